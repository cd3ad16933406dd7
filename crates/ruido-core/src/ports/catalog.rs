use crate::domain::Catalog;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("invalid seed data: {0}")]
  Invalid(String),

  #[error("internal error: {0}")]
  Internal(String),
}

/// Port que abstrae de dónde sale el catálogo inicial.
///
/// La sesión recibe el `Catalog` ya cargado; el origen (datos semilla,
/// fichero, servicio) es decisión del adapter.
pub trait CatalogSource {
  fn load_catalog(&self) -> Result<Catalog, CatalogError>;
}
