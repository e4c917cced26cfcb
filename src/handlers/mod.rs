//! The backend's callable handlers, one file per function.
//!
//! Each handler module follows the convention consumed by
//! [`register_handlers!`](crate::register_handlers): a `NAME` constant and
//! an async `handle` taking `Context<Gateways>`. [`service`] assembles the
//! full registry over a configured gateway bundle.

pub mod create_payment_intent;
pub mod send_booking_notification;

use crate::callable::Service;
use crate::clients::Gateways;
use crate::register_handlers;

/// Build the service with every handler registered.
pub fn service(gateways: Gateways) -> Service<Gateways> {
    register_handlers!(
        Service::new(gateways),
        create_payment_intent,
        send_booking_notification,
    )
}
