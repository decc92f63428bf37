use summabot::ai::chunker::split_into_chunks;

fn sentences(n: usize, words: usize) -> String {
    (0..n)
        .map(|i| format!("Sentence {i} {}. ", "word ".repeat(words).trim_end()))
        .collect()
}

#[test]
fn test_example_splits_one_sentence_per_chunk() {
    assert_eq!(split_into_chunks("A. B. C.", 5), vec!["A. ", "B. ", "C."]);
}

#[test]
fn test_concatenation_reconstructs_input() {
    let text = sentences(200, 12);
    let chunks = split_into_chunks(&text, 300);
    assert!(chunks.len() > 1);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_chunks_stay_below_max() {
    let text = sentences(300, 9);
    for chunk in split_into_chunks(&text, 500) {
        assert!(
            chunk.chars().count() < 500,
            "chunk too long: {}",
            chunk.len()
        );
    }
}

#[test]
fn test_oversized_sentence_is_its_own_chunk() {
    let big = format!("{}. ", "x".repeat(50));
    let text = format!("Short one. {big}Tail.");
    let chunks = split_into_chunks(&text, 20);
    assert_eq!(
        chunks,
        vec!["Short one. ".to_string(), big, "Tail.".to_string()]
    );
}

#[test]
fn test_text_without_delimiter_is_single_chunk() {
    let text = "no sentence breaks here at all".repeat(10);
    assert_eq!(split_into_chunks(&text, 10), vec![text.clone()]);
}

#[test]
fn test_order_is_preserved() {
    let text = "One. Two. Three. Four. Five. ";
    let chunks = split_into_chunks(text, 12);
    assert_eq!(chunks.concat(), text);
    assert!(chunks[0].starts_with("One."));
    assert!(chunks.last().unwrap().contains("Five."));
}
