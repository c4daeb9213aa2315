//! SPARQL query text for the agricultural cultivation-type dataset.
//!
//! The endpoint models the taxonomy as a recursively defined hierarchy via
//! the transitive `:hasPart`/`:partOf` property pair, with botanical plant
//! info and (for the detail view) source-system memberships hanging off each
//! cultivation type.  All display strings are filtered to German labels the
//! way the production dataset is curated.

/// Production SPARQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://agriculture.ld.admin.ch/query";

/// IRI of the root cultivation type the hierarchy view is anchored on.
pub const HIERARCHY_ROOT: &str = "https://agriculture.ld.admin.ch/crops/cultivationtype/1";

/// SELECT for the flattened search corpus: one row per cultivation type with
/// GROUP_CONCAT aggregates for every name field the scorer looks at, plus
/// the space-joined set of class IRIs used by the category tabs.
///
/// The `+` forms produce the transitive closure ("all parents/children")
/// while the bare forms produce only direct neighbors; the scorer's
/// indirect-only bonus depends on both being present.
pub fn crop_corpus_query() -> String {
    r#"
PREFIX schema: <http://schema.org/>
PREFIX : <https://agriculture.ld.admin.ch/crops/>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>

SELECT
  ?crop
  ?name
  ?taxonName
  ?description
  (GROUP_CONCAT(DISTINCT ?parentName; SEPARATOR=", ") AS ?allParentNames)
  (GROUP_CONCAT(DISTINCT ?directParentName; SEPARATOR=", ") AS ?directParentNames)
  (GROUP_CONCAT(DISTINCT ?commonName; SEPARATOR=", ") AS ?commonNames)
  (GROUP_CONCAT(DISTINCT ?allChildName; SEPARATOR=", ") AS ?allChildNames)
  (GROUP_CONCAT(DISTINCT ?directChildName; SEPARATOR=", ") AS ?directChildNames)
  (GROUP_CONCAT(DISTINCT ?class; SEPARATOR=" ") AS ?classes)
WHERE {
  ?crop a :CultivationType .
  ?crop schema:name ?name .
  FILTER(LANG(?name) = "de")

  ?crop a ?class .

  OPTIONAL {
    ?crop :partOf+ ?parent .
    ?parent schema:name ?parentName .
    FILTER(LANG(?parentName) = "de")
  }

  OPTIONAL {
    ?crop :partOf ?directParent .
    ?directParent schema:name ?directParentName .
    FILTER(LANG(?directParentName) = "de")
  }

  OPTIONAL {
    ?crop :hasPart+ ?allChild .
    ?allChild schema:name ?allChildName .
    FILTER(LANG(?allChildName) = "de")
  }

  OPTIONAL {
    ?crop :hasPart ?directChild .
    ?directChild schema:name ?directChildName .
    FILTER(LANG(?directChildName) = "de")
  }

  OPTIONAL {
    ?crop :botanicalPlant ?plant .
    ?plant :taxonName ?taxonName .
    ?plant (schema:name|schema:alternateName) ?commonName .
    FILTER(LANG(?commonName)="de")
  }
  OPTIONAL {
    ?crop schema:description ?description .
    FILTER(LANG(?description)="de")
  }
}
GROUP BY ?crop ?name ?taxonName ?description
ORDER BY ?name
"#
    .to_string()
}

/// SELECT for the hierarchy edge list: every child→parent pair reachable
/// from the given root via `:hasPart*`.  Each binding row names both
/// endpoints so the graph builder can create nodes and edges in one pass.
pub fn hierarchy_edges_query(root_iri: &str) -> String {
    format!(
        r#"
PREFIX schema: <http://schema.org/>
PREFIX : <https://agriculture.ld.admin.ch/crops/>

SELECT DISTINCT ?child ?childName ?parent ?parentName
WHERE {{
  <{}> :hasPart* ?child .
  ?child :partOf ?parent .
  ?child schema:name ?childName .
  FILTER(LANG(?childName) = "de")
  ?parent schema:name ?parentName .
  FILTER(LANG(?parentName) = "de")
}}
"#,
        root_iri
    )
}

/// CONSTRUCT for the detail subtree of a single cultivation type: the node
/// itself with name/description, its botanical plant, its source-system
/// memberships with optional validity interval, and any typed attribute
/// pairs.  The response arrives as framed JSON-LD with the node objects
/// nested under `@graph`; the framing itself is the endpoint-side JSON-LD
/// processor's job.
pub fn node_details_query(node_iri: &str) -> String {
    format!(
        r#"
PREFIX schema: <http://schema.org/>
PREFIX : <https://agriculture.ld.admin.ch/crops/>

CONSTRUCT {{
  <{iri}> a :CultivationType ;
      schema:name ?name ;
      schema:description ?description ;
      :botanicalPlant ?plant ;
      :membership ?membership ;
      :attribute ?attribute .
  ?plant :taxonName ?taxonName ;
      schema:name ?commonName .
  ?membership :system ?systemName ;
      schema:identifier ?identifier ;
      schema:validFrom ?validFrom ;
      schema:validThrough ?validTo .
  ?attribute :attributeType ?attributeTypeName ;
      :attributeValue ?attributeValueName .
}}
WHERE {{
  <{iri}> schema:name ?name .
  FILTER(LANG(?name) = "de")
  OPTIONAL {{
    <{iri}> schema:description ?description .
    FILTER(LANG(?description) = "de")
  }}
  OPTIONAL {{
    <{iri}> :botanicalPlant ?plant .
    ?plant :taxonName ?taxonName .
    OPTIONAL {{
      ?plant (schema:name|schema:alternateName) ?commonName .
      FILTER(LANG(?commonName) = "de")
    }}
  }}
  OPTIONAL {{
    <{iri}> :membership ?membership .
    ?membership :system/schema:name ?systemName .
    OPTIONAL {{ ?membership schema:identifier ?identifier . }}
    OPTIONAL {{ ?membership schema:validFrom ?validFrom . }}
    OPTIONAL {{ ?membership schema:validThrough ?validTo . }}
  }}
  OPTIONAL {{
    <{iri}> :attribute ?attribute .
    ?attribute :attributeType/schema:name ?attributeTypeName .
    ?attribute :attributeValue/schema:name ?attributeValueName .
  }}
}}
"#,
        iri = node_iri
    )
}
