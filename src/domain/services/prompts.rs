#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;

/// Curated story ideas cycled into the prompt input with Tab, and printed
/// by the `prompts` subcommand.
pub fn example_prompts() -> Vec<&'static str> {
    return vec![
        "A tomato plant in space",
        "A lighthouse keeper who befriends a storm",
        "Two robots open a bakery on the moon",
        "A cat detective solves the case of the missing yarn",
        "The last librarian on a flooded Earth",
        "A dragon learns to paint with its fire",
        "An astronaut finds a door on the far side of the moon",
        "A snail enters a city marathon",
    ];
}
