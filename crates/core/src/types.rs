/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Normalized bounding box `[x_min, x_max, y_min, y_max]`.
pub type BoundingBox = [f32; 4];
