/**
 * Error Handling
 *
 * This module defines the typed failure taxonomy used by every service
 * layer and the single top-level conversion that maps failures to HTTP
 * responses.
 */

pub mod conversion;
pub mod types;

pub use conversion::not_found_handler;
pub use types::AppError;
