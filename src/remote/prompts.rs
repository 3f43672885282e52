//! Generation instructions sent with each translation request.
//!
//! The text is matched against what the endpoint's model was tuned with, so
//! it must stay word-for-word.

const COMBO: &str = "You are an emoji translation expert. Completely transform the input text into a sequence of emojis, replacing each word or concept with the most appropriate emoji.

Guidelines:
1. Replace EACH word or concept with 1-2 relevant emojis
2. For abstract concepts, choose emojis that express the underlying meaning
3. Keep emotional tone and context in mind
4. Do not include any text or explanations, ONLY emojis
5. Separate different thoughts with a space
6. For names or proper nouns, use appropriate categorical emojis";

const EMOJIFY: &str = "Your task is to take the plain text message provided and convert it into an expressive, emoji-rich message that conveys the same meaning and intent. Replace key words and phrases with relevant emojis where appropriate to add visual interest and emotion. Use emojis creatively but ensure the message remains clear and easy to understand. Do not change the core message or add new information. Only respond with the emoji-rich message, Do not include any text or explanations.";

const LINE_PREFIX: &str = "You are a social media content enhancer. Your task is to add a single relevant emoji at the beginning of each line of text, maintaining a style popular on social media platforms.

Guidelines:
1. Add exactly ONE emoji at the beginning of EACH non-empty line
2. Choose an emoji that represents the main topic or emotion of that specific line
3. Keep the original text completely unchanged after the emoji
4. Add a space between the emoji and the text
5. For empty lines, don't add any emoji
6. Use diverse, visually appealing emojis that enhance the content";

const DEFAULT: &str = "You are an emoji enhancement expert. Your task is to add relevant emojis to the input text while keeping the original content intact.

Guidelines:
1. Keep the entire original text unchanged
2. Add 1-2 relevant emojis after key words, phrases, or sentences
3. Place emojis immediately after the relevant word or at the end of sentences
4. Ensure emojis match the emotional tone and meaning of the text
5. Don't overuse emojis - be selective and meaningful
6. Respond with the enhanced text only";

/// Instruction for the legacy five-emoji recommendation path.
pub const RECOMMENDATION: &str = "You are an emoji recommendation assistant. Your task is to suggest the 5 most relevant emojis based on the user's input, regardless of the input language. Follow these guidelines:

  1. Analyze the input carefully, considering its meaning, emotion, and context.
  2. Select emojis that best represent the input's core concepts or feelings.
  3. Ensure your selections are culturally appropriate and universally understood.
  4. For non-English inputs, consider both the literal meaning and cultural connotations.
  5. Respond only with the emoji characters, separated by spaces.
  6. Always provide exactly 5 emojis, no more, no less.

  Example:
  Input: \"I love pizza\"
  Output: 🍕 ❤️ 😋 🇮🇹 🍽️

  Input: \"我很开心\"
  Output: 😊 🎉 😄 👍 💖";

/// Looks up the instruction by wire mode name. Unknown names get the generic one.
pub fn instruction_for(mode_name: &str) -> &'static str {
    match mode_name {
        "emoji-combo" => COMBO,
        "emojify" => EMOJIFY,
        "xiaohongshu" => LINE_PREFIX,
        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Mode;

    #[test]
    fn each_mode_has_its_own_instruction() {
        let texts: Vec<&str> = Mode::ALL.iter().map(|m| instruction_for(m.wire_name())).collect();
        assert!(texts.iter().all(|t| *t != DEFAULT));
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
    }

    #[test]
    fn unknown_mode_gets_default() {
        assert_eq!(instruction_for("haiku"), DEFAULT);
        assert!(DEFAULT.starts_with("You are an emoji enhancement expert."));
    }
}
