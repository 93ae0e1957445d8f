//! 优化参数字段名规范化
//!
//! 服务端返回的优化参数为 snake_case，提交回测时需要 camelCase，
//! 且部分字段必须是数组

use serde_json::{Map, Value};

/// 提交时必须为数组的字段（按原始字段名匹配）
pub const LIST_KEYS: [&str; 6] = ["am", "hm", "q", "p", "b", "max_stock_weight"];

/// `date_start` -> `dateStart`
///
/// 除第一个单词外，每个单词首字母大写、其余小写
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, word) in key.split('_').enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// 递归规范化字段名，返回新的值，不修改输入
pub fn normalize_fields(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(normalize_fields).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                let item = if LIST_KEYS.contains(&key.as_str()) && !item.is_array() {
                    normalize_fields(&Value::Array(vec![item.clone()]))
                } else {
                    normalize_fields(item)
                };
                out.insert(snake_to_camel(key), item);
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("date_start"), "dateStart");
        assert_eq!(snake_to_camel("max_stock_weight"), "maxStockWeight");
        assert_eq!(snake_to_camel("mv_LB"), "mvLb");
        assert_eq!(snake_to_camel("rho"), "rho");
        assert_eq!(snake_to_camel("restrictSt"), "restrictSt");
    }

    #[test]
    fn test_scalar_list_key_is_wrapped() {
        assert_eq!(normalize_fields(&json!({"am": 0.3})), json!({"am": [0.3]}));
        assert_eq!(
            normalize_fields(&json!({"max_stock_weight": 0.007, "hm": [0.5]})),
            json!({"maxStockWeight": [0.007], "hm": [0.5]})
        );
    }

    #[test]
    fn test_wrapping_only_applies_to_list_keys() {
        let input = json!({"trade_limit": 0.07, "shrinkage": 0.3});
        assert_eq!(
            normalize_fields(&input),
            json!({"tradeLimit": 0.07, "shrinkage": 0.3})
        );
    }

    #[test]
    fn test_nesting_is_preserved() {
        let input = json!({
            "bench_weight": {"000852.SH": 1},
            "groups": [{"idst_lb": -0.05, "b": 1.6}, 3, null],
            "pre_pos": null
        });
        let expected = json!({
            "benchWeight": {"000852.SH": 1},
            "groups": [{"idstLb": -0.05, "b": [1.6]}, 3, null],
            "prePos": null
        });
        assert_eq!(normalize_fields(&input), expected);
    }

    #[test]
    fn test_input_is_untouched_and_idempotent() {
        let input = json!({"am": 0.3, "date_end": "2022-01-05"});
        let once = normalize_fields(&input);
        assert_eq!(input, json!({"am": 0.3, "date_end": "2022-01-05"}));
        assert_eq!(normalize_fields(&once), once);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(normalize_fields(&json!(42)), json!(42));
        assert_eq!(normalize_fields(&json!("a_b")), json!("a_b"));
        assert_eq!(normalize_fields(&json!([1, "x"])), json!([1, "x"]));
    }
}
