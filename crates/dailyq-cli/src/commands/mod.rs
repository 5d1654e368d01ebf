//! Command handlers for the CLI

pub mod author;
pub mod config;
pub mod notify;
pub mod quote;
pub mod reset;
pub mod saved;
pub mod status;
pub mod unlock;

#[cfg(test)]
pub(crate) mod test_support {
    use dailyq_core::{Catalog, MemoryStore, Session, Windows};

    use crate::output::{Output, OutputFormat};

    pub fn session() -> Session {
        Session::new(
            MemoryStore::new(),
            Catalog::bundled().unwrap(),
            Windows::default(),
        )
    }

    pub fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }
}
