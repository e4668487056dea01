pub mod activities;
pub mod admins;
pub mod emotion_records;
pub mod emotions;
pub mod exercises;
pub mod health;
pub mod journal;
pub mod meditations;
pub mod phrases;
pub mod reports;
pub mod users;
