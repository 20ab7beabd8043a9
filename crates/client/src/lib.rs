//! Client code for pustaka.
//!
//! This crate provides the books API fetch pipeline, response parsing into
//! [`Book`] records, and the two platform collaborators the search screen
//! needs: a connectivity check and a link opener.

pub mod books;
pub mod connectivity;
pub mod opener;

pub use books::{
    Book, BookSource, BooksClient, BooksConfig, FetchError, LinkError, SearchQuery, build_query, navigable,
    parse_books,
};

pub use connectivity::{Connectivity, TcpProbe};
pub use opener::{LinkOpener, SystemOpener};
