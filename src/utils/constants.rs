/// Master index file names
pub const INDEX_FILE: &str = "ar_index_global_prof.txt";
pub const GZIP_SUFFIX: &str = ".gz";

/// Directory names, relative to the project root
pub const DATA_DIR: &str = "data";
pub const DOCS_DIR: &str = "docs";

/// Columns every index must provide
pub const COL_FILE: &str = "file";
pub const COL_DATE: &str = "date";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_FILE, COL_DATE, COL_LATITUDE, COL_LONGITUDE];

/// Placeholder coordinates used by the GDAC when a position is not available
pub const MISSING_LATITUDE: f64 = -99.999;
pub const MISSING_LONGITUDE: f64 = -999.999;

/// Packed date divisors: YYYYMMDDHHMMSS -> YYYYMMDD -> YYYY
pub const TIME_OF_DAY_DIVISOR: i64 = 1_000_000;
pub const MONTH_DAY_DIVISOR: i64 = 10_000;

/// Output file names
pub const SEARCH_TABLE_JSON: &str = "search_table.json";
pub const SEARCH_TABLE_JSON_GZ: &str = "search_table.json.gz";
pub const SAMPLE_TABLE_JSON: &str = "search_table_sample.json";
pub const SAMPLE_TABLE_JSON_GZ: &str = "search_table_sample.json.gz";
pub const YEAR_FILE_EXTENSION: &str = "json";

/// Processing defaults
pub const DEFAULT_SAMPLE_ROWS: usize = 5_000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Environment variable prefix for layout overrides
pub const ENV_PREFIX: &str = "ARGO_LOOKUP";
