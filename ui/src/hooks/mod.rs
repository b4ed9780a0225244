pub mod use_estate_app;
