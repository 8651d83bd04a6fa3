pub mod lookup;
pub mod memory;
pub mod source;
pub mod stop_words;
pub mod wordnet;

pub use lookup::lookup_word;
pub use memory::MemorySource;
pub use source::{LexicalSource, Synset, WordnetDb};
pub use stop_words::is_stop_word;
pub use wordnet::WordnetFile;
