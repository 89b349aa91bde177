pub mod submittable_repo;
pub mod user_repo;

pub use submittable_repo::SubmittableRepo;
pub use user_repo::UserRepo;
