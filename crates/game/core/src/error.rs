//! Construction-time defects in injected catalog data.

/// Errors raised while validating injected registries.
///
/// These are configuration defects, surfaced once at construction and
/// never silently skipped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("drop table '{table_id}' has no usable weight (sum must be > 0)")]
    ZeroWeightTable { table_id: String },

    #[error("drop table '{table_id}' entry '{item_code}' has min quantity above max")]
    InvalidQuantityRange { table_id: String, item_code: String },

    #[error("monster registry has no normal-rarity templates to pick from")]
    EmptyMonsterPool,

    #[error("monster '{code}' declares unknown variant target '{variant_of}'")]
    UnknownVariantTarget { code: String, variant_of: String },

    #[error("duplicate monster code '{code}'")]
    DuplicateMonsterCode { code: String },
}
