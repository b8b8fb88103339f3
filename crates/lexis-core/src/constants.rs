/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Page size used by the store's full-population scan.
pub const SCAN_PAGE_SIZE: u64 = 256;

/// Hard cap on one `list` page.
pub const MAX_LIST_LIMIT: u64 = 500;

/// Default page size for keyword fetch when callers pass no limit.
pub const DEFAULT_KEYWORD_LIMIT: u64 = 50;
