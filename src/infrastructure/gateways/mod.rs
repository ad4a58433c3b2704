pub mod stripe_payment_gateway;
