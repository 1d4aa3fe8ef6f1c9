/// Decimal precision for ledger calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Default page size for paginated ledger listings
pub const DEFAULT_PAGE_SIZE: i64 = 50;
