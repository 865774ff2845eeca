pub mod watched_movie_repo;

pub use watched_movie_repo::WatchedMovieRepo;
