//! Brickset v2 XML 응답의 형태를 그대로 옮긴 구조체.
//!
//! 모든 필드를 문자열로 받은 후 [`super::Build`], [`super::Review`]로 변환한다.
//! 빈 엘리먼트(`<subtheme />`)는 변환 과정에서 `None`이 된다.

use serde::Deserialize;

/// `getSets`, `getSet` 응답의 루트 엘리먼트
#[derive(Debug, Deserialize)]
pub struct ArrayOfSets {
    #[serde(rename = "sets")]
    pub sets: Option<Vec<SetRecord>>,
}

/// `getReviews` 응답의 루트 엘리먼트
#[derive(Debug, Deserialize)]
pub struct ArrayOfReviews {
    #[serde(rename = "reviews")]
    pub reviews: Option<Vec<ReviewRecord>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SetRecord {
    #[serde(rename = "setID", default)]
    pub set_id: Option<String>,
    #[serde(rename = "number", default)]
    pub number: Option<String>,
    #[serde(rename = "numberVariant", default)]
    pub number_variant: Option<String>,
    #[serde(rename = "name", default)]
    pub name: Option<String>,
    #[serde(rename = "year", default)]
    pub year: Option<String>,
    #[serde(rename = "theme", default)]
    pub theme: Option<String>,
    #[serde(rename = "themeGroup", default)]
    pub theme_group: Option<String>,
    #[serde(rename = "subtheme", default)]
    pub subtheme: Option<String>,
    #[serde(rename = "pieces", default)]
    pub pieces: Option<String>,
    #[serde(rename = "minifigs", default)]
    pub minifigs: Option<String>,
    #[serde(rename = "thumbnailURL", default)]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    #[serde(rename = "bricksetURL", default)]
    pub brickset_url: Option<String>,
    #[serde(rename = "released", default)]
    pub released: Option<String>,
    #[serde(rename = "owned", default)]
    pub owned: Option<String>,
    #[serde(rename = "wanted", default)]
    pub wanted: Option<String>,
    #[serde(rename = "qtyOwned", default)]
    pub qty_owned: Option<String>,
    #[serde(rename = "userNotes", default)]
    pub user_notes: Option<String>,
    #[serde(rename = "UKRetailPrice", default)]
    pub uk_retail_price: Option<String>,
    #[serde(rename = "USRetailPrice", default)]
    pub us_retail_price: Option<String>,
    #[serde(rename = "CARetailPrice", default)]
    pub ca_retail_price: Option<String>,
    #[serde(rename = "EURetailPrice", default)]
    pub eu_retail_price: Option<String>,
    #[serde(rename = "rating", default)]
    pub rating: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "author", default)]
    pub author: Option<String>,
    #[serde(rename = "datePosted", default)]
    pub date_posted: Option<String>,
    #[serde(rename = "overallRating", default)]
    pub overall_rating: Option<String>,
    #[serde(rename = "parts", default)]
    pub parts: Option<String>,
    #[serde(rename = "buildingExperience", default)]
    pub building_experience: Option<String>,
    #[serde(rename = "playability", default)]
    pub playability: Option<String>,
    #[serde(rename = "valueForMoney", default)]
    pub value_for_money: Option<String>,
    #[serde(rename = "title", default)]
    pub title: Option<String>,
    #[serde(rename = "review", default)]
    pub review: Option<String>,
    #[serde(rename = "HTML", default)]
    pub html: Option<String>,
}
