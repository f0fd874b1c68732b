//! 输入校验的性质测试。
//!
//! # 教案级注释概览
//! - **核心目标 (Why)**：标识符与参数规则是分发路径唯一的安全闸门，逐例测试无法覆盖输入空间，
//!   因此用 Proptest 随机生成输入，断言规则在整个定义域上成立；
//! - **性质列表 (What)**：
//!   1. 任意 `[A-Za-z0-9_-]+` 字符串被接受，缓存开关不影响结论；
//!   2. 含空格、`@`、`/` 的字符串一律被拒绝；
//!   3. 清洗结果只包含标识符字符，且清洗是幂等的；
//!   4. 含 `__proto__`/`constructor`/`prototype` 键的对象一律被拒绝；
//!   5. 只含安全标量值的对象一律被接受；
//!   6. 缓存条目数不超过 `max_cache_size`；
//!   7. 运行时开关补丁只覆盖出现的字段。

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{Map, Value};
use waypoint::validator::{contains_script, is_valid_params, sanitize_route_identifier};
use waypoint::{ConfigurationManager, InputValidator, NoopLogger, RuntimeOptionsPatch};

fn validator_with(patch: RuntimeOptionsPatch) -> InputValidator {
    let configuration = Arc::new(ConfigurationManager::new(Arc::new(NoopLogger)));
    configuration.set_performance_config(patch);
    InputValidator::new(configuration)
}

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,40}"
}

fn forbidden_separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("@"), Just("/")]
}

fn safe_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[A-Za-z0-9 .,]{0,24}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

proptest! {
    #[test]
    fn prop_identifiers_are_accepted(name in identifier(), cached in any::<bool>()) {
        let validator = validator_with(RuntimeOptionsPatch::default().enable_cache(cached));
        prop_assert!(validator.is_valid_route_identifier(&name));
        // 第二次调用在缓存开启时命中缓存，结论不变。
        prop_assert!(validator.is_valid_route_identifier(&name));
    }

    #[test]
    fn prop_separators_are_rejected(
        head in "[A-Za-z0-9_-]{0,12}",
        separator in forbidden_separator(),
        tail in "[A-Za-z0-9_-]{0,12}",
    ) {
        let validator = validator_with(RuntimeOptionsPatch::default());
        let name = format!("{head}{separator}{tail}");
        prop_assert!(!validator.is_valid_route_identifier(&name));
    }

    #[test]
    fn prop_sanitized_output_is_identifier_or_empty(raw in any::<String>()) {
        let cleaned = sanitize_route_identifier(&raw);
        prop_assert!(cleaned.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        prop_assert_eq!(sanitize_route_identifier(&cleaned), cleaned.clone());

        let validator = validator_with(RuntimeOptionsPatch::default());
        prop_assert_eq!(validator.is_valid_route_identifier(&cleaned), !cleaned.is_empty());
    }

    #[test]
    fn prop_sanitize_keeps_valid_identifiers(name in identifier()) {
        let padded = format!("  {name}\t");
        prop_assert_eq!(sanitize_route_identifier(&padded), name);
    }

    #[test]
    fn prop_reserved_keys_are_rejected(
        reserved in prop_oneof![Just("__proto__"), Just("constructor"), Just("prototype")],
        others in prop::collection::btree_map("[a-z]{1,8}", safe_scalar(), 0..6),
    ) {
        let mut object: Map<String, Value> = others.into_iter().collect();
        object.insert(reserved.to_owned(), Value::Object(Map::new()));
        prop_assert!(!is_valid_params(Some(&Value::Object(object))));
    }

    #[test]
    fn prop_safe_objects_are_accepted(
        entries in prop::collection::btree_map("[a-z]{1,8}", safe_scalar(), 0..8),
    ) {
        let object: Map<String, Value> = entries.into_iter().collect();
        prop_assert!(is_valid_params(Some(&Value::Object(object))));
    }

    #[test]
    fn prop_script_markers_are_detected(
        prefix in "[a-z ]{0,8}",
        marker in prop_oneof![
            Just("<script"),
            Just("JAVASCRIPT:"),
            Just("onload="),
            Just("Data:Text/Html"),
        ],
    ) {
        let text = format!("{prefix}{marker}");
        prop_assert!(contains_script(&text));
    }

    #[test]
    fn prop_cache_never_exceeds_capacity(
        capacity in 1usize..16,
        names in prop::collection::vec(identifier(), 0..48),
    ) {
        let validator = validator_with(RuntimeOptionsPatch::default().max_cache_size(capacity));
        for name in &names {
            validator.is_valid_route_identifier(name);
            prop_assert!(validator.cache().len() <= capacity);
        }
    }

    #[test]
    fn prop_patches_only_touch_present_fields(
        first_cache in proptest::option::of(any::<bool>()),
        first_size in proptest::option::of(1usize..1000),
        second_validation in proptest::option::of(any::<bool>()),
        second_logs in proptest::option::of(any::<bool>()),
    ) {
        let configuration = ConfigurationManager::new(Arc::new(NoopLogger));
        let defaults = configuration.performance_config();

        let mut first = RuntimeOptionsPatch::default();
        first.enable_cache = first_cache;
        if let Some(size) = first_size {
            first = first.max_cache_size(size);
        }
        let second = RuntimeOptionsPatch {
            enable_validation: second_validation,
            enable_dev_logs: second_logs,
            ..RuntimeOptionsPatch::default()
        };
        configuration.set_performance_config(first);
        configuration.set_performance_config(second);

        let options = configuration.performance_config();
        prop_assert_eq!(options.enable_cache, first_cache.unwrap_or(defaults.enable_cache));
        let expected_size = first_size.unwrap_or(defaults.max_cache_size.get());
        let expected_validation = second_validation.unwrap_or(defaults.enable_validation);
        prop_assert_eq!(options.max_cache_size.get(), expected_size);
        prop_assert_eq!(options.enable_validation, expected_validation);
        prop_assert_eq!(options.enable_dev_logs, second_logs.unwrap_or(defaults.enable_dev_logs));
    }
}
