mod decimal;

pub use decimal::{DEFAULT_PRECISION, Decimal, MAX_SCALE, QuantizeError};
pub use uuid::Uuid;
