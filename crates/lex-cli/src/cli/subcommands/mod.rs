pub mod auth;
pub mod customers;
pub mod docx;
pub mod petitions;

pub use auth::AuthCommands;
pub use customers::CustomerCommands;
pub use docx::DocxCommands;
pub use petitions::PetitionCommands;
