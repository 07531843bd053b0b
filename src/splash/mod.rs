pub mod screen;

pub use screen::SplashScreen;
