pub mod watched_movie;
