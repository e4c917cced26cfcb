//! Wire-level gateway client tests against stub upstream servers.


mod fcm_api;
