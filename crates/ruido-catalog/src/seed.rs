use once_cell::sync::Lazy;
use ruido_core::domain::{Licenses, PackId, Price, Producer, ProducerId, Rating, Sample, SampleId, SampleKind};

// Static seed data of the storefront. Packs are not listed here: they are
// derived from the producers when the catalog is built.

fn producer(id: &str, name: &str, specialization: &[&str], bio: &str, sample_count: u32, rating_tenths: u16) -> Producer {
  Producer {
    id: ProducerId::from(id),
    name: name.to_string(),
    specialization: specialization.iter().map(|s| s.to_string()).collect(),
    bio: bio.to_string(),
    avatar: format!("https://picsum.photos/seed/{id}/200/200"),
    sample_count,
    rating: Rating::from_tenths(rating_tenths),
  }
}

pub static PRODUCERS: Lazy<Vec<Producer>> = Lazy::new(|| {
  vec![
    producer("p1", "Ghost Echo", &["Techno", "Dark Ambient"], "Analog synth textures.", 12, 49),
    producer("p2", "Lush Theory", &["Neo-Soul", "Lo-Fi"], "Warm Rhodes chords.", 8, 48),
    producer("p3", "HyperDrive", &["D&B", "Neurofunk"], "Precision reese basses.", 15, 50),
    producer("p4", "Neon Samurai", &["Synthwave", "Phonk"], "80s aesthetics.", 22, 47),
    producer("p5", "Vanta Black", &["Industrial", "Techno"], "Pure sonic darkness.", 10, 49),
    producer("p6", "Cloud Kicker", &["Ambient", "Lo-Fi"], "Ethereal soundscapes.", 30, 46),
    producer("p7", "Circuit Break", &["Glitch", "IDM"], "Error-based beauty.", 14, 48),
    producer("p8", "Soul Architect", &["House", "Disco"], "Classic groove design.", 18, 49),
    producer("p9", "Bit Crusher", &["8-Bit", "Chiptune"], "Retro gaming sounds.", 25, 45),
    producer("p10", "Static Flow", &["Dub Techno"], "Deep immersion.", 11, 47),
    producer("p11", "Velvet Moon", &["Jazz", "Chillhop"], "Smooth nocturnal vibes.", 19, 48),
    producer("p12", "Titan Sound", &["Cinematic", "Epic"], "Orchestral power.", 5, 50),
    producer("p13", "Pulse Width", &["Minimal", "Micro"], "Precise textures.", 16, 46),
    producer("p14", "Sub Zero", &["Trap", "Grime"], "Low-end specialists.", 28, 49),
    producer("p15", "Aether", &["Future Bass"], "Crystal clear leads.", 12, 47),
    producer("p16", "Mod Matrix", &["Modular", "Experimental"], "Unpredictable voltage.", 9, 48),
    producer("p17", "Redux", &["Boom Bap"], "Golden era drums.", 33, 47),
    producer("p18", "Frequency", &["Psytrance"], "High-speed energy.", 21, 46),
    producer("p19", "Analog Kid", &["Synth-pop"], "Vintage oscillators.", 17, 48),
    producer("p20", "Last Call", &["Post-Rock"], "Atmospheric guitars.", 10, 49),
  ]
});

struct SeedSample {
  id: &'static str,
  title: &'static str,
  producer: (&'static str, &'static str),
  pack: &'static str,
  genre: &'static str,
  bpm: u16,
  key: &'static str,
  kind: SampleKind,
  price_cents: u32,
  licenses: (u32, u32),
  track: u8,
  tags: &'static [&'static str],
  description: &'static str,
}

impl From<&SeedSample> for Sample {
  fn from(s: &SeedSample) -> Self {
    Sample {
      id: SampleId::from(s.id),
      title: s.title.to_string(),
      producer_id: ProducerId::from(s.producer.0),
      producer_name: s.producer.1.to_string(),
      pack_id: Some(PackId::from(s.pack)),
      genre: s.genre.to_string(),
      bpm: s.bpm,
      key: s.key.to_string(),
      kind: s.kind,
      price: Price::from_cents(s.price_cents),
      licenses: Licenses::capped(s.licenses.0, s.licenses.1),
      audio_url: format!("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{}.mp3", s.track),
      tags: s.tags.iter().map(|t| t.to_string()).collect(),
      description: s.description.to_string(),
    }
  }
}

const SEED_SAMPLES: &[SeedSample] = &[
  SeedSample {
    id: "s1",
    title: "Void Sub Bass Loop",
    producer: ("p1", "Ghost Echo"),
    pack: "sp0",
    genre: "Techno",
    bpm: 128,
    key: "Fm",
    kind: SampleKind::Loop,
    price_cents: 2499,
    licenses: (2, 5),
    track: 1,
    tags: &["dark", "heavy", "analog"],
    description: "A deep, modulated sub-bass loop recorded from a Moog Sub 37.",
  },
  SeedSample {
    id: "s2",
    title: "Dusk Rhodes Progressions",
    producer: ("p2", "Lush Theory"),
    pack: "sp1",
    genre: "Neo-Soul",
    bpm: 90,
    key: "EbMaj7",
    kind: SampleKind::Loop,
    price_cents: 1850,
    licenses: (4, 5),
    track: 2,
    tags: &["warm", "jazzy", "electric piano"],
    description: "Beautifully voiced Rhodes chords with vintage tape saturation.",
  },
  SeedSample {
    id: "s3",
    title: "Steel Snare One-Shot",
    producer: ("p3", "HyperDrive"),
    pack: "sp2",
    genre: "D&B",
    bpm: 174,
    key: "N/A",
    kind: SampleKind::OneShot,
    price_cents: 500,
    licenses: (0, 5),
    track: 3,
    tags: &["punchy", "high-frequency", "sharp"],
    description: "A clinical, high-frequency snare hit designed for neurofunk.",
  },
  SeedSample {
    id: "s4",
    title: "Warehouse Kick Drum",
    producer: ("p1", "Ghost Echo"),
    pack: "sp0",
    genre: "Techno",
    bpm: 130,
    key: "C",
    kind: SampleKind::OneShot,
    price_cents: 799,
    licenses: (4, 5),
    track: 4,
    tags: &["industrial", "distorted", "peak-time"],
    description: "A thunderous kick drum with high-end distortion and room reverb.",
  },
  SeedSample {
    id: "s5",
    title: "Rainy Day Beat",
    producer: ("p2", "Lush Theory"),
    pack: "sp1",
    genre: "Lo-Fi",
    bpm: 84,
    key: "N/A",
    kind: SampleKind::Loop,
    price_cents: 1200,
    licenses: (1, 5),
    track: 5,
    tags: &["dusty", "vinyl", "chill"],
    description: "Textured lo-fi hip hop drum loop with vinyl crackle.",
  },
];

/// Initial artifacts with their license counters at process start.
pub static SAMPLES: Lazy<Vec<Sample>> = Lazy::new(|| SEED_SAMPLES.iter().map(Sample::from).collect());
