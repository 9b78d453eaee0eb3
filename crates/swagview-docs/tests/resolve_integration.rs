//! Integration tests for example payload resolution.
//!
//! The fixture is a protoc-gen-swagger style document: long prefixed
//! definition names, nested references, arrays of references and a
//! reference to a definition the document never declares.

use proptest::prelude::*;
use serde_json::json;
use swagview_docs::{
    describe, DefinitionRegistry, DocsViewer, PrimitiveType, Reference, ResolvedValue, Resolver,
    SchemaNode, SchemaOrRef, SwaggerDocument,
};

const FIGHT_ANALYSIS: &str = include_str!("fixtures/fight_analysis.json");

fn load_viewer() -> DocsViewer {
    let doc = SwaggerDocument::from_json_str(FIGHT_ANALYSIS).unwrap();
    let mut viewer = DocsViewer::new();
    viewer.load_document(doc);
    viewer
}

#[test]
fn test_fight_analysis_reply() {
    let viewer = load_viewer();
    let reply = viewer
        .resolve_ref(&Reference::to_definition("das_dota2GetFeFightAnalysisReply"))
        .unwrap();

    assert_eq!(
        reply.to_json(),
        json!({
            "match_id": "Type: string (Format: int64) Title: Match ID",
            "result": "Type: string Default: WIN Enum: WIN, LOSE",
            "radiant": {
                "name": "Type: string Desc: Team display name",
                "score": "Type: integer (Format: int32)"
            },
            "fights": [{
                "start_time": "Type: integer (Format: int64) Title: Seconds from game start",
                "winner": {
                    "name": "Type: string Desc: Team display name",
                    "score": "Type: integer (Format: int32)"
                },
                "replay": null
            }],
            "tags": "Type: array Items Type: string"
        })
    );
}

#[test]
fn test_key_order_follows_document() {
    let viewer = load_viewer();
    let reply = viewer
        .resolve_ref(&Reference::to_definition("das_dota2GetFeFightAnalysisReply"))
        .unwrap();

    let keys: Vec<&str> = reply
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["match_id", "result", "radiant", "fights", "tags"]);
}

#[test]
fn test_array_definition_resolves_to_single_element() {
    let viewer = load_viewer();
    let heroes = viewer
        .resolve_ref(&Reference::to_definition("das_dota2HeroList"))
        .unwrap();
    let team = viewer.resolve_ref(&Reference::to_definition("das_dota2FightTeam"));

    assert_eq!(heroes.as_array().unwrap(), [team]);
}

#[test]
fn test_primitive_and_missing_definitions_are_absent() {
    let viewer = load_viewer();
    assert!(viewer
        .resolve_ref(&Reference::to_definition("das_dota2Side"))
        .is_none());
    assert!(viewer
        .resolve_ref(&Reference::to_definition("das_dota2Replay"))
        .is_none());
}

#[test]
fn test_response_examples_for_every_operation() {
    let viewer = load_viewer();
    let doc = viewer.document().unwrap();

    for item in doc.paths.values() {
        for (_, op) in item.operations() {
            let examples = viewer.response_examples(op);
            assert!(examples.values().all(Option::is_some));
        }
    }
}

#[test]
fn test_rendered_page() {
    let viewer = load_viewer();
    let html = viewer.render().unwrap().unwrap();

    assert!(html.contains("<h3>GetFeFightAnalysis</h3>"));
    assert!(html.contains("<h3>ListHeroes</h3>"));
    assert!(html.contains("<pre>/v1/fe/fight_analysis/{match_id}</pre>"));
    assert!(html.contains("<td>lang</td>"));
    assert!(html.contains("Type: string (Format: int64) Title: Match ID"));
}

#[test]
fn test_reload_drops_previous_definitions() {
    let mut viewer = load_viewer();
    let reference = Reference::to_definition("das_dota2FightTeam");
    assert!(viewer.resolve_ref(&reference).is_some());

    let other = SwaggerDocument::from_json_str(
        r#"{"swagger": "2.0", "info": {"title": "Other", "version": "1"},
            "definitions": {"Item": {"type": "object", "properties": {}}}}"#,
    )
    .unwrap();
    viewer.load_document(other);

    assert!(viewer.resolve_ref(&reference).is_none());
    assert!(viewer
        .resolve_ref(&Reference::to_definition("Item"))
        .is_some());
}

#[test]
fn test_yaml_and_json_agree() {
    let doc = SwaggerDocument::from_json_str(FIGHT_ANALYSIS).unwrap();
    let yaml = serde_yaml::to_string(&serde_json::from_str::<serde_json::Value>(FIGHT_ANALYSIS).unwrap())
        .unwrap();
    let from_yaml = SwaggerDocument::from_yaml_str(&yaml).unwrap();

    let json_registry = DefinitionRegistry::from_definitions(doc.definitions);
    let yaml_registry = DefinitionRegistry::from_definitions(from_yaml.definitions);
    let reference = Reference::to_definition("das_dota2GetFeFightAnalysisReply");

    assert_eq!(
        Resolver::new(&json_registry).resolve_ref(&reference),
        Resolver::new(&yaml_registry).resolve_ref(&reference)
    );
}

fn primitive_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("string"),
        Just("integer"),
        Just("number"),
        Just("boolean"),
    ]
}

proptest! {
    #[test]
    fn object_example_keeps_key_set(
        props in prop::collection::btree_map("[a-z][a-z0-9_]{0,8}", primitive_name(), 0..12)
    ) {
        let node = props.iter().fold(SchemaNode::object(), |node, (name, ty)| {
            node.property(name.clone(), SchemaNode::primitive(PrimitiveType::from_name(ty)))
        });
        let registry = DefinitionRegistry::from_definitions(
            [("Generated".to_string(), node)].into_iter().collect(),
        );
        let resolver = Resolver::new(&registry);
        let reference = Reference::to_definition("Generated");

        let value = resolver.resolve_ref(&reference).unwrap();
        let object = value.as_object().unwrap();

        prop_assert_eq!(
            object.keys().cloned().collect::<Vec<_>>(),
            props.keys().cloned().collect::<Vec<_>>()
        );
        for (name, ty) in &props {
            let expected = describe(&SchemaNode::primitive(PrimitiveType::from_name(ty)));
            prop_assert_eq!(
                object[name].as_ref().and_then(ResolvedValue::as_descriptor),
                Some(expected.as_str())
            );
        }

        prop_assert_eq!(resolver.resolve_ref(&reference), Some(value.clone()));
    }

    #[test]
    fn arbitrary_reference_graphs_terminate(
        edges in prop::collection::vec(prop::collection::vec(0usize..6, 0..4), 1..6)
    ) {
        // Definition `D{i}` has one property per edge; index 5 is never defined.
        let definitions = edges
            .iter()
            .enumerate()
            .map(|(i, targets)| {
                let node = targets.iter().enumerate().fold(SchemaNode::object(), |node, (j, target)| {
                    let slot = if j % 2 == 0 {
                        SchemaOrRef::definition(&format!("D{target}"))
                    } else {
                        SchemaNode::array(SchemaOrRef::definition(&format!("D{target}"))).into()
                    };
                    node.property(format!("p{j}"), slot)
                });
                (format!("D{i}"), node)
            })
            .collect();
        let registry = DefinitionRegistry::from_definitions(definitions);
        let resolver = Resolver::new(&registry);

        for (i, targets) in edges.iter().enumerate() {
            let reference = Reference::to_definition(&format!("D{i}"));
            let value = resolver.resolve_ref(&reference).unwrap();
            prop_assert_eq!(value.as_object().unwrap().len(), targets.len());
            prop_assert_eq!(resolver.resolve_ref(&reference), Some(value));
        }
    }
}
