//! Console presentation adapter.

mod presenter;

pub use presenter::ConsolePresenter;
