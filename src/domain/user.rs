use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the marketplace an account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Vendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Vendor => "vendor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmer" => Ok(Role::Farmer),
            "vendor" => Ok(Role::Vendor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite, with latitude in ±90 and longitude in ±180.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    pub line: String,
    pub landmark: String,
    pub pincode: String,
    pub coordinates: Option<Coordinates>,
}

impl Address {
    pub fn new(line: impl Into<String>, landmark: impl Into<String>, pincode: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            landmark: landmark.into(),
            pincode: pincode.into(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Enough of an address to ship to.
    pub fn is_deliverable(&self) -> bool {
        !self.line.trim().is_empty() && !self.pincode.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub farm_location: Option<Coordinates>,
    pub farm_size: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VendorProfile {
    pub business_name: String,
    pub business_hours: String,
    pub business_address: Address,
}

/// Role-specific extension of a user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    Farmer(FarmerProfile),
    Vendor(VendorProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Farmer(_) => Role::Farmer,
            Profile::Vendor(_) => Role::Vendor,
        }
    }
}

/// Represents a registered account in the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a new user document.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub role: Role,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub profile: Profile,
}

/// Profile edits. Email and role are fixed at sign-up.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub profile: Option<Profile>,
}

impl User {
    /// Shipping address and phone, if the profile has both.
    pub fn shipping_details(&self) -> Option<(Address, String)> {
        let address = self.address.as_ref().filter(|a| a.is_deliverable())?;
        let phone = self.phone.as_ref().filter(|p| !p.trim().is_empty())?;
        Some((address.clone(), phone.clone()))
    }

    pub fn business_name(&self) -> Option<&str> {
        match &self.profile {
            Profile::Vendor(vendor) if !vendor.business_name.trim().is_empty() => Some(&vendor.business_name),
            _ => None,
        }
    }

    /// Where this user is, for distance sorting.
    ///
    /// Vendors are located at their business address. Farmers at their home
    /// address, falling back to the farm location.
    pub fn location(&self) -> Option<Coordinates> {
        match &self.profile {
            Profile::Vendor(vendor) => vendor.business_address.coordinates,
            Profile::Farmer(farmer) => self
                .address
                .as_ref()
                .and_then(|a| a.coordinates)
                .or(farmer.farm_location),
        }
    }
}
