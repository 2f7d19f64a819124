use {
    crate::kernel::entities::{
        PropertyId,
        UserId,
    },
    serde::{
        Deserialize,
        Serialize,
    },
};

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertySize {
    pub value: f64,
    pub unit:  String,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyAddress {
    pub address:  Option<String>,
    pub city:     Option<String>,
    pub state:    Option<String>,
    pub country:  Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub url:         String,
    #[serde(default)]
    pub description: String,
}

/// Copy of the property embedded into an auction at creation time, so the
/// historical auction record survives later edits to the live listing.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub title:         String,
    pub property_type: String,
    pub size:          PropertySize,
    pub address:       PropertyAddress,
    #[serde(default)]
    pub images:        Vec<PropertyImage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyStatus {
    PendingApproval,
    Approved,
    InAuction,
    Sold,
    Delisted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub id:            PropertyId,
    pub seller_id:     UserId,
    pub title:         String,
    pub description:   String,
    pub property_type: String,
    pub size:          PropertySize,
    pub address:       PropertyAddress,
    pub images:        Vec<PropertyImage>,
    pub status:        PropertyStatus,
}

impl Property {
    pub fn snapshot(&self) -> PropertySnapshot {
        PropertySnapshot {
            title:         self.title.clone(),
            property_type: self.property_type.clone(),
            size:          self.size.clone(),
            address:       self.address.clone(),
            images:        self.images.clone(),
        }
    }
}
