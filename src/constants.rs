//! Names and defaults shared across the pipeline stages

/// Database holding the raw sensor records
pub const DB_NAME: &str = "aps_db";
/// Collection holding the raw sensor records
pub const COLLECTION_NAME: &str = "sensor_tb";
/// Environment variable pointing at the record store root
pub const STORE_URL_KEY: &str = "SENSOR_STORE_URL";

pub const ARTIFACT_DIR: &str = "artifact";
pub const SCHEMA_FILE_PATH: &str = "config/schema.yaml";
pub const LOG_DIR: &str = "log";

/// Literal used by the sensor export for a missing reading
pub const MISSING_TOKEN: &str = "na";
/// Column added by the record store, never a feature
pub const RECORD_ID_COLUMN: &str = "_id";

pub const TRAIN_FILE_NAME: &str = "train.bin";
pub const TEST_FILE_NAME: &str = "test.bin";
pub const PREPROCESSING_OBJECT_FILE_NAME: &str = "preprocessing.bin";

pub const DATA_TRANSFORMATION_DIR_NAME: &str = "data_transformation";
pub const DATA_TRANSFORMATION_TRANSFORMED_DATA_DIR: &str = "transformed";
pub const DATA_TRANSFORMATION_TRANSFORMED_OBJECT_DIR: &str = "transformed_object";

/// Label strings of the target column and their encoded classes
pub const NEGATIVE_LABEL: &str = "neg";
pub const POSITIVE_LABEL: &str = "pos";
pub const NEGATIVE_CLASS: i64 = 0;
pub const POSITIVE_CLASS: i64 = 1;

pub const DEFAULT_K_NEIGHBORS: usize = 5;
pub const DEFAULT_RANDOM_STATE: u64 = 42;
