use super::example_prompts;

#[test]
fn it_returns_a_fixed_ordered_list() {
    let prompts = example_prompts();
    assert!(!prompts.is_empty());
    assert_eq!(prompts[0], "A tomato plant in space");
    assert_eq!(prompts, example_prompts());
}

#[test]
fn it_has_no_blank_entries() {
    for prompt in example_prompts() {
        assert_eq!(prompt, prompt.trim());
        assert!(!prompt.is_empty());
    }
}
