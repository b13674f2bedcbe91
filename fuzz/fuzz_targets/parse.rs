#![no_main]

use libfuzzer_sys::fuzz_target;
use sampledoc_core::LanguageId;
use sampledoc_syntax::parser;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 never reaches the parser
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parser::parse(LanguageId::Java, s);
        let _ = parser::parse(LanguageId::Kotlin, s);
    }
});
