mod login;
mod management;
