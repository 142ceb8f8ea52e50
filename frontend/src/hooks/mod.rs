pub mod use_signup_wizard;
