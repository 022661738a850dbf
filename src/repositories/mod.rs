pub mod quizz_repository;

pub use quizz_repository::{HttpQuizzRepository, QuizzRepository};

#[cfg(test)]
pub use quizz_repository::MockQuizzRepository;
