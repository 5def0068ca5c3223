//! Sentence-type classifier over the symbolic feature sequence.

use crate::models::{DecisionTreeModel, ModelLoadError};
use companion_application::{ClassifierError, PhraseClassifier};
use companion_domain::{
    AttributeSchema, ClassifierInput, FeaturePipeline, InputKind, LabelDistribution,
};

/// Classifies the grammatical shape of a sentence (question kind, imperative,
/// declarative) with a nominal decision tree.
///
/// The pipeline variant must match the one the model was trained with: with
/// terminator normalization the `end` attribute ranges over QM/EM/DT,
/// without it over the typed punctuation.
#[derive(Debug)]
pub struct SentenceTypeClassifier {
    name: String,
    labels: Vec<String>,
    pipeline: FeaturePipeline,
    schema: AttributeSchema,
    model: DecisionTreeModel,
}

impl SentenceTypeClassifier {
    pub fn new(
        name: impl Into<String>,
        labels: Vec<String>,
        terminator_normalization: bool,
        model: DecisionTreeModel,
    ) -> Result<Self, ModelLoadError> {
        let (pipeline, schema) = if terminator_normalization {
            (
                FeaturePipeline::canonical(),
                AttributeSchema::sentence_type(&labels),
            )
        } else {
            (
                FeaturePipeline::without_terminator_normalization(),
                AttributeSchema::sentence_type_raw(&labels),
            )
        };
        let schema = schema.map_err(|e| ModelLoadError::Schema(e.to_string()))?;
        check_model(&schema, &model)?;

        Ok(Self {
            name: name.into(),
            labels,
            pipeline,
            schema,
            model,
        })
    }
}

fn check_model(schema: &AttributeSchema, model: &DecisionTreeModel) -> Result<(), ModelLoadError> {
    if schema.class_labels().len() != model.labels().len() {
        return Err(ModelLoadError::Cardinality {
            what: "sentence type label".to_string(),
            expected: schema.class_labels().len(),
            actual: model.labels().len(),
        });
    }
    if schema.features().len() != model.attributes().len() {
        return Err(ModelLoadError::Cardinality {
            what: "attribute".to_string(),
            expected: schema.features().len(),
            actual: model.attributes().len(),
        });
    }
    for (expected, actual) in schema.features().iter().zip(model.attributes()) {
        if expected.cardinality() != actual.cardinality() {
            return Err(ModelLoadError::Cardinality {
                what: format!("attribute '{}'", expected.name()),
                expected: expected.cardinality(),
                actual: actual.cardinality(),
            });
        }
        if expected.values() != actual.values() {
            return Err(ModelLoadError::Schema(format!(
                "attribute '{}' has values {:?}, expected {:?}",
                expected.name(),
                actual.values(),
                expected.values()
            )));
        }
    }
    Ok(())
}

impl PhraseClassifier for SentenceTypeClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Features(self.pipeline.clone())
    }

    fn classify(&self, input: &ClassifierInput) -> Result<LabelDistribution, ClassifierError> {
        let ClassifierInput::Features(features) = input else {
            return Err(ClassifierError::UnsupportedInput {
                expected: "features",
                actual: input.kind_name(),
            });
        };
        self.schema.validate(features)?;
        Ok(self.model.distribution(&self.labels, &features.symbols())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::fixtures::{sentence_model, strings};
    use crate::config::DEFAULT_SENTENCE_LABELS;
    use companion_domain::{DomainError, FeatureSequence, Sentence, Token};

    fn classifier(normalized: bool) -> SentenceTypeClassifier {
        SentenceTypeClassifier::new(
            "sentence",
            strings(&DEFAULT_SENTENCE_LABELS),
            normalized,
            DecisionTreeModel::from_json(&sentence_model(normalized)).unwrap(),
        )
        .unwrap()
    }

    fn classify(classifier: &SentenceTypeClassifier, tokens: &[&str], tags: &[&str]) -> LabelDistribution {
        let sentence = Sentence::from_parts(&tokens.join(" "), tokens, tags);
        let input = classifier.prepare(&sentence).unwrap();
        classifier.classify(&input).unwrap()
    }

    #[test]
    fn test_question_shapes() {
        let classifier = classifier(true);
        let what = classify(
            &classifier,
            &["What", "is", "your", "name", "?"],
            &["WP", "VBZ", "PRP$", "NN", "."],
        );
        assert!(what.is_most_likely("INFORMATION"));

        let who = classify(&classifier, &["Who", "are", "you", "?"], &["WP", "VBP", "PRP", "."]);
        assert!(who.is_most_likely("PEOPLE"));

        let how_much = classify(
            &classifier,
            &["How", "much", "is", "it", "?"],
            &["WRB", "JJ", "VBZ", "PRP", "."],
        );
        assert!(how_much.is_most_likely("QUANTITY"));
    }

    #[test]
    fn test_statement_shapes() {
        let classifier = classifier(true);
        let imperative = classify(&classifier, &["Open", "the", "door"], &["VB", "DT", "NN"]);
        assert!(imperative.is_most_likely("IMPERATIVE"));

        let declarative = classify(&classifier, &["Hello", "John"], &["UH", "NNP"]);
        assert!(declarative.is_most_likely("DECLARATIVE"));
    }

    #[test]
    fn test_raw_terminator_variant() {
        let classifier = classifier(false);
        assert!(!classifier.pipeline.normalizes_terminators());
        let what = classify(
            &classifier,
            &["What", "is", "your", "name", "?"],
            &["WP", "VBZ", "PRP$", "NN", "."],
        );
        assert!(what.is_most_likely("INFORMATION"));
    }

    #[test]
    fn test_variant_must_match_model() {
        let err = SentenceTypeClassifier::new(
            "sentence",
            strings(&DEFAULT_SENTENCE_LABELS),
            false,
            DecisionTreeModel::from_json(&sentence_model(true)).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ModelLoadError::Schema(_)));
    }

    #[test]
    fn test_label_count_mismatch() {
        let err = SentenceTypeClassifier::new(
            "sentence",
            strings(&["IMPERATIVE", "DECLARATIVE"]),
            true,
            DecisionTreeModel::from_json(&sentence_model(true)).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelLoadError::Cardinality {
                expected: 2,
                actual: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_domain_wh_word_fails() {
        let classifier = classifier(true);
        let sentence = Sentence::from_parts(
            "Whom did you call?",
            &["Whom", "did", "you", "call", "?"],
            &["WP", "VBD", "PRP", "VB", "."],
        );
        let input = classifier.prepare(&sentence).unwrap();
        let err = classifier.classify(&input).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Domain(DomainError::SchemaViolation { ref attribute, ref value })
                if attribute == "p1" && value == "(whom/WHQ)"
        ));
    }

    #[test]
    fn test_illegal_feature_value() {
        let classifier = classifier(true);
        let mut tokens = vec![Token::start()];
        tokens.extend((0..6).map(|_| Token::any()));
        tokens.push(Token::period());
        let features = FeatureSequence::from_tokens(tokens).unwrap();

        let err = classifier
            .classify(&ClassifierInput::Features(features))
            .unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Domain(DomainError::SchemaViolation { ref attribute, .. }) if attribute == "end"
        ));
    }
}
