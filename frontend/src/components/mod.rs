pub mod club_card_form;
pub mod payment_step;
pub mod personal_data_step;
pub mod step_indicator;
pub mod summary_step;
