use serde::{Deserialize, Serialize};

/// Vista activa del storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppView {
  #[default]
  Landing,
  OracleCore,
  Vault,
  Registry,
  Auth,
}
