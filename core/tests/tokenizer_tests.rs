use raag_core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_splits() {
    let toks = tokenize("Mere Sapno Ki Rani");
    assert_eq!(toks, vec!["mere", "sapno", "ki", "rani"]);
}

#[test]
fn it_applies_nfkc_normalization() {
    // fullwidth forms compose down to ASCII under NFKC
    let toks = tokenize("Ｋｉｓｈｏｒｅ Ｋｕｍａｒ");
    assert_eq!(toks, vec!["kishore", "kumar"]);
}

#[test]
fn it_drops_standalone_single_characters() {
    let toks = tokenize("Aashiqui 2 OST");
    assert_eq!(toks, vec!["aashiqui", "ost"]);
}

#[test]
fn it_keeps_digits_inside_tokens() {
    let toks = tokenize("Mp3 Mix 2024");
    assert_eq!(toks, vec!["mp3", "mix", "2024"]);
}

#[test]
fn empty_input_yields_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   ").is_empty());
}
