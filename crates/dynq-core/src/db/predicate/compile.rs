use crate::{
    db::predicate::{FieldPath, Predicate},
    error::QueryError,
    filter::{FilterNode, FilterValue, strip_list_suffix},
    model::{FieldKind, FieldModel, RecordModel},
    value::{Value, coerce_literal},
};

/// Compile a filter graph against `model`.
///
/// Returns `Ok(None)` when the graph constrains nothing (no entries, or every
/// entry null). Filter entries with no matching field are skipped; entries
/// whose shape cannot apply to the matched field are errors.
pub fn compile_filter(
    model: &RecordModel,
    filter: &FilterNode,
) -> Result<Option<Predicate>, QueryError> {
    let mut clauses = Vec::new();
    compile_node(model, filter, &FieldPath::root(), &mut clauses)?;

    let predicate = Predicate::and(clauses);
    if predicate.is_true() {
        tracing::debug!(record = %model.name, "filter compiled to no constraint");
        return Ok(None);
    }

    tracing::debug!(record = %model.name, predicate = %predicate, "compiled filter");

    Ok(Some(predicate))
}

// Walk one filter level. Clauses are emitted in the model's declared field
// order; entries bound to the same field keep their filter order.
fn compile_node(
    model: &RecordModel,
    node: &FilterNode,
    prefix: &FieldPath,
    out: &mut Vec<Predicate>,
) -> Result<(), QueryError> {
    let mut bound: Vec<(usize, &FilterValue)> = node
        .populated()
        .filter_map(|(name, value)| match_field(model, name).map(|slot| (slot, value)))
        .collect();
    bound.sort_by_key(|(slot, _)| *slot);

    for (slot, value) in bound {
        let Some(field) = model.field(slot) else {
            continue;
        };
        let path = prefix.child(slot, &field.name);

        compile_entry(model, field, path, value, out)?;
    }

    Ok(())
}

// Filter entries bind by exact name, then by the list-suffixed spelling.
// Case-insensitive lookup is reserved for order and select.
fn match_field(model: &RecordModel, name: &str) -> Option<usize> {
    model
        .slot_exact(name)
        .or_else(|| strip_list_suffix(name).and_then(|stem| model.slot_exact(stem)))
}

fn compile_entry(
    model: &RecordModel,
    field: &FieldModel,
    path: FieldPath,
    value: &FilterValue,
    out: &mut Vec<Predicate>,
) -> Result<(), QueryError> {
    match (&field.kind, value) {
        (FieldKind::Record(nested), FilterValue::Node(node)) => {
            // nested clauses are rooted at this field's accessor
            compile_node(nested.get(), node, &path, out)
        }

        (kind, FilterValue::Scalar(literal)) if kind.is_scalar() => {
            let literal = coerce(model, field, literal)?;
            out.push(Predicate::eq(path, literal));
            Ok(())
        }

        (kind, FilterValue::Set(literals)) if kind.is_scalar() => {
            let values = literals
                .iter()
                .map(|literal| coerce(model, field, literal))
                .collect::<Result<Vec<_>, _>>()?;
            out.push(Predicate::in_(path, values));
            Ok(())
        }

        (_, FilterValue::Null) => Ok(()),

        (kind, value) => Err(QueryError::FilterShapeMismatch {
            type_name: model.name.clone(),
            field: field.name.clone(),
            expected: expected_shape(kind),
            found: value.shape_label(),
        }),
    }
}

fn coerce(model: &RecordModel, field: &FieldModel, literal: &Value) -> Result<Value, QueryError> {
    coerce_literal(literal, &field.kind).ok_or_else(|| QueryError::LiteralTypeMismatch {
        type_name: model.name.clone(),
        field: field.name.clone(),
        kind: field.kind.clone(),
        value: literal.clone(),
    })
}

fn expected_shape(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Record(nested) => format!("a nested filter for [{}]", nested.get().name),
        FieldKind::List(_) => format!("no filter ({kind} fields cannot be filtered)"),
        _ => format!("a {kind} value or a set of {kind} values"),
    }
}
