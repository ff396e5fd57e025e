//! Turns sparse search parameters into request envelopes.
//!
//! Builders never fail: out-of-range paging is clamped rather than
//! rejected. Filter order is significant because the upstream numbers
//! filters by position in `filterProcessing`.

use crate::config::SearchDefaults;
use crate::types::animal::{
    ANIMAL_DETAIL_FIELDS, ANIMAL_LIST_FIELDS, AnimalSearchParams, STATUS_AVAILABLE, fields,
};
use crate::types::envelope::{
    Filter, FilterOperation, ObjectType, RequestEnvelope, SearchBlock, conjunction,
};
use crate::types::organization::{ORGANIZATION_FIELDS, ORGANIZATION_ID_FIELD};

fn field_list(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Filters for an animal search, availability last
#[must_use]
pub fn animal_filters(params: &AnimalSearchParams, defaults: &SearchDefaults) -> Vec<Filter> {
    let mut filters = Vec::new();

    if let Some(species) = &params.species {
        filters.push(Filter::equals(fields::SPECIES, species.as_str()));
    }
    if let Some(breed) = &params.breed {
        filters.push(Filter::new(
            fields::BREED,
            FilterOperation::Contains,
            breed.as_str(),
        ));
    }
    if let Some(location) = &params.location {
        filters.push(Filter::equals(fields::LOCATION, location.as_str()));
        filters.push(Filter::new(
            fields::LOCATION_DISTANCE,
            FilterOperation::LessThanOrEqual,
            params.radius.unwrap_or(defaults.default_radius),
        ));
    }
    if let Some(sex) = &params.sex {
        filters.push(Filter::equals(fields::SEX, sex.as_str()));
    }
    if let Some(age) = &params.age {
        filters.push(Filter::equals(fields::GENERAL_AGE, age.as_str()));
    }
    if let Some(size) = &params.size {
        filters.push(Filter::equals(fields::GENERAL_SIZE, size.as_str()));
    }
    if let Some(special_needs) = params.special_needs {
        filters.push(Filter::equals(
            fields::SPECIAL_NEEDS,
            if special_needs { "1" } else { "0" },
        ));
    }

    filters.push(Filter::equals(fields::STATUS, STATUS_AVAILABLE));
    filters
}

/// Envelope for a paged animal search with list-view fields
#[must_use]
pub fn animal_search(params: &AnimalSearchParams, defaults: &SearchDefaults) -> RequestEnvelope {
    let filters = animal_filters(params, defaults);

    RequestEnvelope::search(
        ObjectType::Animal,
        SearchBlock {
            result_start: params.offset.unwrap_or(0),
            result_limit: defaults.effective_limit(params.limit),
            result_sort: Some(
                params
                    .sort
                    .clone()
                    .unwrap_or_else(|| fields::NAME.to_string()),
            ),
            result_order: Some(params.order.unwrap_or_default()),
            calc_found_rows: true,
            filter_processing: conjunction(filters.len()),
            filters,
            fields: field_list(ANIMAL_LIST_FIELDS),
        },
    )
}

fn lookup(object_type: ObjectType, id_field: &str, id: &str, fields: &[&str]) -> RequestEnvelope {
    RequestEnvelope::search(
        object_type,
        SearchBlock {
            result_start: 0,
            result_limit: 1,
            result_sort: None,
            result_order: None,
            calc_found_rows: false,
            filters: vec![Filter::equals(id_field, id)],
            filter_processing: None,
            fields: field_list(fields),
        },
    )
}

/// Envelope for one animal with detail-view fields
#[must_use]
pub fn animal_by_id(id: &str) -> RequestEnvelope {
    lookup(ObjectType::Animal, fields::ID, id, ANIMAL_DETAIL_FIELDS)
}

/// Envelope for one organization
#[must_use]
pub fn organization_by_id(id: &str) -> RequestEnvelope {
    lookup(
        ObjectType::Organization,
        ORGANIZATION_ID_FIELD,
        id,
        ORGANIZATION_FIELDS,
    )
}

/// Smallest useful request, used to check that the service answers
#[must_use]
pub fn probe() -> RequestEnvelope {
    RequestEnvelope::search(
        ObjectType::Animal,
        SearchBlock {
            result_start: 0,
            result_limit: 1,
            result_sort: None,
            result_order: None,
            calc_found_rows: false,
            filters: Vec::new(),
            filter_processing: None,
            fields: vec![fields::ID.to_string()],
        },
    )
}
