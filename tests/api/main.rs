mod api_password;
mod balance;
mod helpers;
