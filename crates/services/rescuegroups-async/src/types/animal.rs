//! Animal records and search parameters

use serde::{Deserialize, Serialize};

use super::envelope::SortOrder;
use super::lenient;

/// Fields fetched for list views
pub const ANIMAL_LIST_FIELDS: &[&str] = &[
    "animalID",
    "animalOrgID",
    "animalName",
    "animalSpecies",
    "animalBreed",
    "animalSex",
    "animalGeneralAge",
    "animalGeneralSizePotential",
    "animalLocation",
    "animalLocationCitystate",
    "animalLocationDistance",
    "animalThumbnailUrl",
    "animalStatus",
];

/// Fields fetched for the detail view
pub const ANIMAL_DETAIL_FIELDS: &[&str] = &[
    "animalID",
    "animalOrgID",
    "animalName",
    "animalSpecies",
    "animalBreed",
    "animalPrimaryBreed",
    "animalSecondaryBreed",
    "animalMixedBreed",
    "animalSex",
    "animalGeneralAge",
    "animalBirthdate",
    "animalGeneralSizePotential",
    "animalColor",
    "animalCoatLength",
    "animalDescription",
    "animalDescriptionPlain",
    "animalSpecialneeds",
    "animalSpecialneedsDescription",
    "animalAltered",
    "animalDeclawed",
    "animalHousetrained",
    "animalOKWithCats",
    "animalOKWithDogs",
    "animalOKWithKids",
    "animalAdoptionFee",
    "animalLocation",
    "animalLocationCitystate",
    "animalLocationDistance",
    "animalThumbnailUrl",
    "animalPictures",
    "animalStatus",
    "animalUpdatedDate",
];

/// Upstream field names used by the animal query builder
pub mod fields {
    /// Record id
    pub const ID: &str = "animalID";
    /// Display name, the default sort
    pub const NAME: &str = "animalName";
    /// Species
    pub const SPECIES: &str = "animalSpecies";
    /// Breed text
    pub const BREED: &str = "animalBreed";
    /// Postal code
    pub const LOCATION: &str = "animalLocation";
    /// Distance from the searched postal code
    pub const LOCATION_DISTANCE: &str = "animalLocationDistance";
    /// Sex
    pub const SEX: &str = "animalSex";
    /// Age bracket
    pub const GENERAL_AGE: &str = "animalGeneralAge";
    /// Expected adult size
    pub const GENERAL_SIZE: &str = "animalGeneralSizePotential";
    /// Special-needs flag
    pub const SPECIAL_NEEDS: &str = "animalSpecialneeds";
    /// Availability status
    pub const STATUS: &str = "animalStatus";
}

/// Status value every search is restricted to
pub const STATUS_AVAILABLE: &str = "Available";

/// One picture attached to an animal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPicture {
    /// Upstream media id
    #[serde(rename = "mediaID", default, deserialize_with = "lenient::optional_string")]
    pub media_id: Option<String>,
    /// Display order
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub media_order: Option<String>,
    /// Full-size image over HTTPS
    #[serde(default)]
    pub url_secure_fullsize: Option<String>,
    /// Thumbnail over HTTPS
    #[serde(default)]
    pub url_secure_thumbnail: Option<String>,
}

/// An adoptable animal
///
/// List searches fill only the list fields; detail lookups fill the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    /// Record id
    #[serde(rename = "animalID", deserialize_with = "lenient::id")]
    pub id: String,
    /// Owning organization id
    #[serde(rename = "animalOrgID", default, deserialize_with = "lenient::optional_string")]
    pub org_id: Option<String>,
    /// Name
    #[serde(rename = "animalName", default)]
    pub name: Option<String>,
    /// Species
    #[serde(rename = "animalSpecies", default)]
    pub species: Option<String>,
    /// Breed text
    #[serde(rename = "animalBreed", default)]
    pub breed: Option<String>,
    /// Primary breed
    #[serde(rename = "animalPrimaryBreed", default)]
    pub primary_breed: Option<String>,
    /// Secondary breed
    #[serde(rename = "animalSecondaryBreed", default)]
    pub secondary_breed: Option<String>,
    /// Mixed-breed flag as sent upstream
    #[serde(rename = "animalMixedBreed", default, deserialize_with = "lenient::optional_string")]
    pub mixed_breed: Option<String>,
    /// Sex
    #[serde(rename = "animalSex", default)]
    pub sex: Option<String>,
    /// Age bracket
    #[serde(rename = "animalGeneralAge", default)]
    pub general_age: Option<String>,
    /// Birthdate
    #[serde(rename = "animalBirthdate", default)]
    pub birthdate: Option<String>,
    /// Expected adult size
    #[serde(rename = "animalGeneralSizePotential", default)]
    pub general_size: Option<String>,
    /// Color
    #[serde(rename = "animalColor", default)]
    pub color: Option<String>,
    /// Coat length
    #[serde(rename = "animalCoatLength", default)]
    pub coat_length: Option<String>,
    /// HTML description
    #[serde(rename = "animalDescription", default)]
    pub description: Option<String>,
    /// Plain-text description
    #[serde(rename = "animalDescriptionPlain", default)]
    pub description_plain: Option<String>,
    /// Special-needs flag as sent upstream
    #[serde(rename = "animalSpecialneeds", default, deserialize_with = "lenient::optional_string")]
    pub special_needs: Option<String>,
    /// Special-needs details
    #[serde(rename = "animalSpecialneedsDescription", default)]
    pub special_needs_description: Option<String>,
    /// Spayed/neutered
    #[serde(rename = "animalAltered", default, deserialize_with = "lenient::optional_string")]
    pub altered: Option<String>,
    /// Declawed
    #[serde(rename = "animalDeclawed", default, deserialize_with = "lenient::optional_string")]
    pub declawed: Option<String>,
    /// House trained
    #[serde(rename = "animalHousetrained", default, deserialize_with = "lenient::optional_string")]
    pub housetrained: Option<String>,
    /// Good with cats
    #[serde(rename = "animalOKWithCats", default, deserialize_with = "lenient::optional_string")]
    pub ok_with_cats: Option<String>,
    /// Good with dogs
    #[serde(rename = "animalOKWithDogs", default, deserialize_with = "lenient::optional_string")]
    pub ok_with_dogs: Option<String>,
    /// Good with kids
    #[serde(rename = "animalOKWithKids", default, deserialize_with = "lenient::optional_string")]
    pub ok_with_kids: Option<String>,
    /// Adoption fee text
    #[serde(rename = "animalAdoptionFee", default, deserialize_with = "lenient::optional_string")]
    pub adoption_fee: Option<String>,
    /// Postal code
    #[serde(rename = "animalLocation", default, deserialize_with = "lenient::optional_string")]
    pub location: Option<String>,
    /// "City, ST"
    #[serde(rename = "animalLocationCitystate", default)]
    pub location_city_state: Option<String>,
    /// Distance from the searched postal code
    #[serde(
        rename = "animalLocationDistance",
        default,
        deserialize_with = "lenient::optional_string"
    )]
    pub location_distance: Option<String>,
    /// Thumbnail URL
    #[serde(rename = "animalThumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    /// Pictures, detail lookups only
    #[serde(rename = "animalPictures", default, deserialize_with = "lenient::list")]
    pub pictures: Vec<AnimalPicture>,
    /// Availability status
    #[serde(rename = "animalStatus", default)]
    pub status: Option<String>,
    /// Last update timestamp as sent upstream
    #[serde(rename = "animalUpdatedDate", default)]
    pub updated_date: Option<String>,
}

/// Optional parameters of an animal search
///
/// Filters are emitted in the declaration order of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalSearchParams {
    /// Species, matched with exact case
    pub species: Option<String>,
    /// Breed substring
    pub breed: Option<String>,
    /// Postal code to search around
    pub location: Option<String>,
    /// Miles around `location`
    pub radius: Option<u32>,
    /// Sex
    pub sex: Option<String>,
    /// Age bracket
    pub age: Option<String>,
    /// Adult size
    pub size: Option<String>,
    /// Restrict to (or away from) special-needs animals
    pub special_needs: Option<bool>,
    /// Page size; clamped to the configured maximum
    pub limit: Option<u32>,
    /// Offset of the first result
    pub offset: Option<u32>,
    /// Sort field; defaults to the name
    pub sort: Option<String>,
    /// Sort direction; defaults to ascending
    pub order: Option<SortOrder>,
}

impl AnimalSearchParams {
    /// Creates an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the species
    #[must_use]
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Sets the breed substring
    #[must_use]
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Sets the postal code
    #[must_use]
    pub fn with_location(mut self, postal_code: impl Into<String>) -> Self {
        self.location = Some(postal_code.into());
        self
    }

    /// Sets the radius in miles
    #[must_use]
    pub const fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the sex
    #[must_use]
    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    /// Sets the age bracket
    #[must_use]
    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    /// Sets the adult size
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Sets the special-needs restriction
    #[must_use]
    pub const fn with_special_needs(mut self, special_needs: bool) -> Self {
        self.special_needs = Some(special_needs);
        self
    }

    /// Sets the page size
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the offset
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the sort field and direction
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(field.into());
        self.order = Some(order);
        self
    }
}
