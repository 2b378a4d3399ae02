use crate::vocabulary::Vocabulary;

/// Builds the extraction instruction sent alongside every document of a batch.
pub fn build_instruction(vocabulary: &Vocabulary) -> String {
    format!(
        r#"
添付された文書画像から、以下の情報をJSON形式で抽出してください。
1. bureau: 文書を発行した局名（通常右上に記載）。リストから選択: {bureaus}
2. category: 件名から推測される分類。リストから選択: {categories}
3. title: 文書の件名（「件名：」などのプレフィックスは除く）

出力は以下のJSON形式のみにしてください：
{{ "bureau": "...", "category": "...", "title": "..." }}
"#,
        bureaus = vocabulary.bureaus.join(", "),
        categories = vocabulary.categories.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_embeds_vocabularies() {
        let instruction = build_instruction(&Vocabulary::default());
        assert!(instruction.contains("政策企画局, 子供政策連携室, 総務局"));
        assert!(instruction.contains("その他, 災害関係"));
    }

    #[test]
    fn test_instruction_names_output_shape() {
        let instruction = build_instruction(&Vocabulary::default());
        assert!(instruction.contains(r#"{ "bureau": "...", "category": "...", "title": "..." }"#));
        assert!(instruction.contains("件名："));
    }

    #[test]
    fn test_instruction_is_deterministic() {
        let vocab = Vocabulary::new(vec!["A局".into()], vec!["B".into()]);
        assert_eq!(build_instruction(&vocab), build_instruction(&vocab));
        assert!(build_instruction(&vocab).contains("リストから選択: A局"));
    }
}
