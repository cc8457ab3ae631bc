//! End-to-end assembly of a full request body against a hand-written tree.

use searchbody::aggs::{self, Aggregation, HistogramOptions};
use searchbody::query;
use searchbody::sort::{Sort, SortOrder};
use searchbody::{Error, Highlight, Search, SourceFilter};
use serde_json::json;

#[test]
fn test_full_body_matches_hand_written_tree() {
    let body = Search::new()
        .query(
            query::bool_query()
                .must(query::match_query("title", "rust async"))
                .filter(query::term("status", "published"))
                .filter(query::range("year").gte(2020).lt(2026))
                .must_not(query::exists("retracted_at"))
                .minimum_should_match(1)
                .should(query::match_phrase("body", "zero cost")),
        )
        .post_filter(query::term("format", "paper"))
        .from(0)
        .size(25)
        .min_score(0.5)
        .timeout("2s")
        .track_total_hits(true)
        .source(SourceFilter::fields(["title", "year", "authors"]))
        .sort(Sort::field("year").order(SortOrder::Desc))
        .sort("_score")
        .agg(
            "by_year",
            Aggregation::from(aggs::histogram("year", 1.0).min_doc_count(1).keyed(true))
                .aggregation("avg_citations", aggs::avg("citations")),
        )
        .agg("distinct_authors", aggs::cardinality("author_id"))
        .highlight(
            Highlight::new()
                .field("title")
                .field("body")
                .pre_tags(["<em>"])
                .post_tags(["</em>"])
                .fragment_size(150),
        );

    let expected = json!({
        "query": {
            "bool": {
                "must": [
                    {"match": {"title": {"query": "rust async"}}}
                ],
                "filter": [
                    {"term": {"status": {"value": "published"}}},
                    {"range": {"year": {"gte": 2020, "lt": 2026}}}
                ],
                "should": [
                    {"match_phrase": {"body": {"query": "zero cost"}}}
                ],
                "must_not": [
                    {"exists": {"field": "retracted_at"}}
                ],
                "minimum_should_match": 1
            }
        },
        "post_filter": {"term": {"format": {"value": "paper"}}},
        "from": 0,
        "size": 25,
        "min_score": 0.5,
        "timeout": "2s",
        "track_total_hits": true,
        "_source": ["title", "year", "authors"],
        "sort": [
            {"year": "desc"},
            "_score"
        ],
        "aggs": {
            "by_year": {
                "histogram": {
                    "field": "year",
                    "interval": 1.0,
                    "min_doc_count": 1,
                    "keyed": true
                },
                "aggs": {
                    "avg_citations": {"avg": {"field": "citations"}}
                }
            },
            "distinct_authors": {"cardinality": {"field": "author_id"}}
        },
        "highlight": {
            "fields": {"body": {}, "title": {}},
            "pre_tags": ["<em>"],
            "post_tags": ["</em>"],
            "fragment_size": 150
        }
    });

    assert_eq!(body.to_value().unwrap(), expected);
}

#[test]
fn test_serialization_leaves_builder_reusable() {
    let body = Search::new()
        .query(query::match_all())
        .agg("by_status", aggs::terms("status").size(10));
    let first = body.to_value().unwrap();
    let second = body.to_value().unwrap();
    assert_eq!(first, second);

    // The builder is still usable after serializing.
    let extended = body.agg("count", aggs::value_count("id"));
    let value = extended.to_value().unwrap();
    assert!(value["aggs"]["count"].is_object());
}

#[test]
fn test_validation_errors_surface_from_nested_aggregations() {
    let body = Search::new().agg("empty_ranges", aggs::range("price"));
    let err = body.to_value().unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField("ranges")));

    let body = Search::new().agg(
        "outer",
        aggs::filter(query::match_all()).aggregation("inner", aggs::filters()),
    );
    let err = body.to_value().unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField("filters")));
}

#[test]
fn test_pretty_json_is_parseable() {
    let body = Search::new()
        .query(query::term("status", "active"))
        .size(5);
    let pretty = searchbody::util::to_pretty_json(&body).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(reparsed, body.to_value().unwrap());
}
