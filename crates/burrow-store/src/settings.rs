use burrow_core::ExpiryCalendar;
use typed_builder::TypedBuilder;

pub const DEFAULT_CODE_LENGTH: usize = 5;
pub const DEFAULT_MAX_GENERATE_ATTEMPTS: usize = 8;

/// Configures a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreSettings {
    /// Length of generated short codes.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// How many generated codes to try before giving up on a collision.
    #[builder(default = DEFAULT_MAX_GENERATE_ATTEMPTS)]
    pub max_generate_attempts: usize,
    /// Format and time zone of expiry dates.
    #[builder(default)]
    pub calendar: ExpiryCalendar,
}

impl StoreSettings {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.code_length == 0 {
            return Err("code_length must be at least 1".to_string());
        }
        if self.max_generate_attempts == 0 {
            return Err("max_generate_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
