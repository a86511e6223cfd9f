pub mod currency;
pub mod error;
pub mod in_flight;
pub mod session;
pub mod wire;

pub use currency::{format_currency, Currency, DEFAULT_CURRENCY};
pub use error::{AppError, ErrorSurface, Result};
pub use in_flight::{InFlight, InFlightPermit};
pub use session::Session;
