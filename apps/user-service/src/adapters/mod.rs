pub mod users_sea;
