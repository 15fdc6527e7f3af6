//! Keyword, article and preposition classification

use super::kinds;
use crate::frontend::core::lexer::{Article, Keyword, Preposition, TokenKind};

#[cfg(test)]
mod lexer_keywords_tests {
    use super::*;

    #[test]
    fn test_all_keywords() {
        let source = "import publish require match case otherwise parallel each \
                      where when as and or not is exists contains matches";
        let expected: Vec<TokenKind> = [
            Keyword::Import,
            Keyword::Publish,
            Keyword::Require,
            Keyword::Match,
            Keyword::Case,
            Keyword::Otherwise,
            Keyword::Parallel,
            Keyword::Each,
            Keyword::Where,
            Keyword::When,
            Keyword::As,
            Keyword::And,
            Keyword::Or,
            Keyword::Not,
            Keyword::Is,
            Keyword::Exists,
            Keyword::Contains,
            Keyword::Matches,
        ]
        .into_iter()
        .map(TokenKind::Keyword)
        .collect();
        assert_eq!(kinds(source), expected);
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            kinds("PUBLISH Match oTherWise"),
            vec![
                TokenKind::Keyword(Keyword::Publish),
                TokenKind::Keyword(Keyword::Match),
                TokenKind::Keyword(Keyword::Otherwise),
            ]
        );
    }

    #[test]
    fn test_articles() {
        assert_eq!(
            kinds("a An THE"),
            vec![
                TokenKind::Article(Article::A),
                TokenKind::Article(Article::An),
                TokenKind::Article(Article::The),
            ]
        );
    }

    // classification ignores angle brackets; the parser decides what a noun is
    #[test]
    fn test_article_inside_brackets_is_still_an_article() {
        assert_eq!(
            kinds("<a>"),
            vec![TokenKind::Lt, TokenKind::Article(Article::A), TokenKind::Gt]
        );
    }

    #[test]
    fn test_prepositions() {
        assert_eq!(
            kinds("from for with to into in on at by via against"),
            vec![
                TokenKind::Preposition(Preposition::From),
                TokenKind::Preposition(Preposition::For),
                TokenKind::Preposition(Preposition::With),
                TokenKind::Preposition(Preposition::To),
                TokenKind::Preposition(Preposition::Into),
                TokenKind::Preposition(Preposition::In),
                TokenKind::Preposition(Preposition::On),
                TokenKind::Preposition(Preposition::At),
                TokenKind::Preposition(Preposition::By),
                TokenKind::Preposition(Preposition::Via),
                TokenKind::Preposition(Preposition::Against),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            kinds("format matcher anything"),
            vec![
                TokenKind::Identifier("format".to_string()),
                TokenKind::Identifier("matcher".to_string()),
                TokenKind::Identifier("anything".to_string()),
            ]
        );
    }

    #[test]
    fn test_hyphenated_keyword_is_identifier() {
        assert_eq!(
            kinds("for-each"),
            vec![TokenKind::Identifier("for-each".to_string())]
        );
    }

    #[test]
    fn test_verbs_are_identifiers() {
        assert_eq!(
            kinds("Extract Return Emit"),
            vec![
                TokenKind::Identifier("Extract".to_string()),
                TokenKind::Identifier("Return".to_string()),
                TokenKind::Identifier("Emit".to_string()),
            ]
        );
    }
}
