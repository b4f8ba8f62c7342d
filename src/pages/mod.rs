pub mod books;
pub mod chatbot;
pub mod home;
pub mod login;
pub mod news;
pub mod notifications;
pub mod profile;
pub mod quiz_take;
pub mod quizzes;
pub mod register;
pub mod shared;
pub mod tasks;
pub mod unauthorized;
