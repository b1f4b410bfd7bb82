pub mod god;
pub mod pantheon;

pub use god::God;
pub use pantheon::Pantheon;
