use serde::{Deserialize, Serialize};

/// Week bitmask with every day (Sunday through Saturday) set
pub const ALL_WEEK: u8 = 0b111_1111;

/// Body of `POST /api/rules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRuleOption {
    pub is_time_specification: bool,
    pub search_option: SearchOption,
    pub reserve_option: ReserveOption,
    pub save_option: SaveOption,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOption {
    pub keyword: String,
    /// Case-sensitive keyword match
    #[serde(rename = "keyCS")]
    pub key_cs: bool,
    pub key_reg_exp: bool,
    /// Search program names
    pub name: bool,
    /// Search program descriptions
    pub description: bool,
    /// Search extended descriptions
    pub extended: bool,
    pub times: Vec<SearchTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTime {
    pub week: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveOption {
    pub enable: bool,
    /// Keep recordings whose end was cut off
    pub allow_end_lack: bool,
    /// Skip programs that were already recorded
    pub avoid_duplicate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOption {
    pub parent_directory_name: String,
    pub directory: String,
    pub recorded_format: String,
}

impl AddRuleOption {
    /// Rule recording every broadcast whose name or description contains `title`,
    /// on any day, saved under `<parent_directory>/<title>`.
    pub fn keyword_rule(title: &str, parent_directory: &str, recorded_format: &str) -> Self {
        Self {
            is_time_specification: true,
            search_option: SearchOption {
                keyword: title.to_string(),
                key_cs: false,
                key_reg_exp: false,
                name: true,
                description: true,
                extended: false,
                times: vec![SearchTime { week: ALL_WEEK }],
            },
            reserve_option: ReserveOption {
                enable: true,
                allow_end_lack: true,
                avoid_duplicate: false,
            },
            save_option: SaveOption {
                parent_directory_name: parent_directory.to_string(),
                directory: title.to_string(),
                recorded_format: recorded_format.to_string(),
            },
        }
    }

    pub fn keyword(&self) -> &str {
        &self.search_option.keyword
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyword_rule_wire_format() {
        let rule = AddRuleOption::keyword_rule("Show A", "recorded", "TS");
        let value = serde_json::to_value(&rule).unwrap();

        assert_eq!(
            value,
            json!({
                "isTimeSpecification": true,
                "searchOption": {
                    "keyword": "Show A",
                    "keyCS": false,
                    "keyRegExp": false,
                    "name": true,
                    "description": true,
                    "extended": false,
                    "times": [{ "week": 127 }]
                },
                "reserveOption": {
                    "enable": true,
                    "allowEndLack": true,
                    "avoidDuplicate": false
                },
                "saveOption": {
                    "parentDirectoryName": "recorded",
                    "directory": "Show A",
                    "recordedFormat": "TS"
                }
            })
        );
    }
}
