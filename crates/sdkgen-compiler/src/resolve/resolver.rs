//! Selection-set flattening for interface and union types.

use sdkgen_core::{Document, Schema, Selection, TYPENAME_FIELD, TypeKind};

use super::{Branch, Record, RecordField, SelectionShape};
use crate::{Error, Result, Site};

pub struct Resolver<'a> {
    schema: &'a Schema,
    document: &'a Document,
}

/// A field together with the concrete types it was selected for.
struct Entry {
    /// `None` when selected for every runtime type of the parent.
    scope: Option<Vec<String>>,
    field: RecordField,
}

/// Accumulated state for one selection set.
struct Walk<'p> {
    /// Runtime types of the parent, in schema order.
    possible: &'p [String],
    entries: Vec<Entry>,
    branch_order: Vec<String>,
    discriminator: Option<String>,
    /// Fragment spreads currently being expanded.
    spreads: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema, document: &'a Document) -> Self {
        Self { schema, document }
    }

    /// Resolve `selection` made on `type_name`.
    ///
    /// The base record holds the fields selected for every runtime type. A
    /// fragment narrowing to a subset of the runtime types contributes to one
    /// branch per concrete type in that subset; a fragment on the parent type
    /// itself, or on an abstract type covering all of its runtime types,
    /// flattens into the base.
    pub fn resolve(
        &self,
        type_name: &str,
        selection: &[Selection],
        site: &Site,
    ) -> Result<SelectionShape> {
        if self.schema.get(type_name).is_none() {
            return Err(Error::UnresolvedType {
                name: type_name.to_string(),
                site: site.clone(),
            });
        }

        let possible: Vec<String> = self
            .schema
            .possible_types(type_name)
            .into_iter()
            .map(String::from)
            .collect();
        let mut walk = Walk {
            possible: &possible,
            entries: Vec::new(),
            branch_order: Vec::new(),
            discriminator: None,
            spreads: Vec::new(),
        };
        self.collect(type_name, None, selection, site, &mut walk)?;
        if self
            .schema
            .kind_of(type_name)
            .is_some_and(TypeKind::is_abstract)
        {
            self.require_typename(type_name, &mut walk);
        }

        let base = merge(walk.entries.iter().filter(|e| e.scope.is_none()), site)?;
        let mut branches = Vec::with_capacity(walk.branch_order.len());
        for concrete in &walk.branch_order {
            let applies = |entry: &&Entry| match &entry.scope {
                None => true,
                Some(types) => types.contains(concrete),
            };
            branches.push(Branch {
                type_name: concrete.clone(),
                record: merge(walk.entries.iter().filter(applies), site)?,
            });
        }

        Ok(SelectionShape {
            type_name: type_name.to_string(),
            discriminator: walk.discriminator,
            base,
            branches,
        })
    }

    fn collect(
        &self,
        lookup: &str,
        scope: Option<&[String]>,
        selection: &[Selection],
        site: &Site,
        walk: &mut Walk<'_>,
    ) -> Result<()> {
        for item in selection {
            match item {
                Selection::Field(field) => {
                    let Some(def) = self.schema.field(lookup, &field.name) else {
                        return Err(Error::UnknownField {
                            type_name: lookup.to_string(),
                            field: field.name.clone(),
                            site: site.clone(),
                        });
                    };
                    let key = field.response_key();
                    if field.name == TYPENAME_FIELD && walk.discriminator.is_none() {
                        walk.discriminator = Some(key.to_string());
                    }
                    walk.entries.push(Entry {
                        scope: scope.map(<[String]>::to_vec),
                        field: RecordField {
                            response_key: key.to_string(),
                            field_name: field.name.clone(),
                            ty: def.ty,
                            selection: field.selection.clone(),
                            description: def.description,
                        },
                    });
                }
                Selection::InlineFragment(fragment) => match &fragment.type_condition {
                    None => self.collect(lookup, scope, &fragment.selection, site, walk)?,
                    Some(condition) => {
                        self.narrow(condition, lookup, scope, &fragment.selection, site, walk)?
                    }
                },
                Selection::FragmentSpread { name } => {
                    let Some(fragment) = self.document.fragment(name) else {
                        return Err(Error::UnknownFragment {
                            name: name.clone(),
                            site: site.clone(),
                        });
                    };
                    if walk.spreads.contains(name) {
                        return Err(Error::FragmentCycle {
                            name: name.clone(),
                            site: site.clone(),
                        });
                    }
                    walk.spreads.push(name.clone());
                    self.narrow(
                        &fragment.type_condition,
                        lookup,
                        scope,
                        &fragment.selection,
                        site,
                        walk,
                    )?;
                    walk.spreads.pop();
                }
            }
        }
        Ok(())
    }

    /// Abstract selections always carry `__typename` in the base record and
    /// dispatch on it; the request text asks for it at the same levels.
    fn require_typename(&self, type_name: &str, walk: &mut Walk<'_>) {
        let selected = walk
            .entries
            .iter()
            .find(|entry| entry.scope.is_none() && entry.field.field_name == TYPENAME_FIELD);
        if let Some(entry) = selected {
            walk.discriminator = Some(entry.field.response_key.clone());
            return;
        }
        let Some(def) = self.schema.field(type_name, TYPENAME_FIELD) else {
            return;
        };
        walk.discriminator = Some(TYPENAME_FIELD.to_string());
        walk.entries.insert(
            0,
            Entry {
                scope: None,
                field: RecordField {
                    response_key: TYPENAME_FIELD.to_string(),
                    field_name: TYPENAME_FIELD.to_string(),
                    ty: def.ty,
                    selection: Vec::new(),
                    description: None,
                },
            },
        );
    }

    fn narrow(
        &self,
        condition: &str,
        parent: &str,
        scope: Option<&[String]>,
        selection: &[Selection],
        site: &Site,
        walk: &mut Walk<'_>,
    ) -> Result<()> {
        if self.schema.get(condition).is_none() {
            return Err(Error::UnresolvedType {
                name: condition.to_string(),
                site: site.clone(),
            });
        }

        let current = scope.unwrap_or(walk.possible);
        let matching: Vec<String> = self
            .schema
            .possible_types(condition)
            .into_iter()
            .filter(|t| current.iter().any(|c| c == t))
            .map(String::from)
            .collect();

        if matching.is_empty() {
            return Err(Error::InvalidFragmentTarget {
                target: condition.to_string(),
                parent: parent.to_string(),
                site: site.clone(),
            });
        }

        if walk.possible.iter().all(|t| matching.contains(t)) {
            return self.collect(condition, None, selection, site, walk);
        }

        for concrete in &matching {
            if !walk.branch_order.contains(concrete) {
                walk.branch_order.push(concrete.clone());
            }
        }
        self.collect(condition, Some(&matching), selection, site, walk)
    }
}

/// Merge entries into one record; repeated keys must select the same field.
fn merge<'e>(entries: impl Iterator<Item = &'e Entry>, site: &Site) -> Result<Record> {
    let mut record = Record::default();
    for Entry { field, .. } in entries {
        let Some(existing) = record.fields.get_mut(&field.response_key) else {
            record
                .fields
                .insert(field.response_key.clone(), field.clone());
            continue;
        };

        let reason = if existing.field_name != field.field_name {
            Some(format!(
                "`{}` and `{}` are different fields",
                existing.field_name, field.field_name
            ))
        } else if existing.ty != field.ty {
            Some(format!("types `{}` and `{}` differ", existing.ty, field.ty))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Error::ConflictingField {
                key: field.response_key.clone(),
                reason,
                site: site.child(&field.response_key),
            });
        }

        existing.selection.extend(field.selection.iter().cloned());
        if existing.description.is_none() {
            existing.description.clone_from(&field.description);
        }
    }
    Ok(record)
}
