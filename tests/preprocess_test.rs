use nodescan::extractor::preprocess::{fold_string_groups, trivialize_function_bodies};

#[test]
fn test_fold_merges_adjacent_literals() {
    let code = r#"options = {"tooltip": (
    "Drastically reduces memory use "
    "but will introduce seams."
)}"#;

    let folded = fold_string_groups(code);
    assert_eq!(
        folded,
        r#"options = {"tooltip": ("Drastically reduces memory use but will introduce seams.")}"#
    );
}

#[test]
fn test_fold_is_idempotent() {
    let code = r#"
x = ("first part " "second part")
y = ("IMAGE",)
z = f("call", "args")
"#;

    let once = fold_string_groups(code);
    let twice = fold_string_groups(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_fold_leaves_tuples_and_calls_alone() {
    let code = r#"RETURN_TYPES = ("MODEL", "CLIP", "VAE")"#;
    assert_eq!(fold_string_groups(code), code);

    let single_element = r#"RETURN_TYPES = ("IMAGE",)"#;
    assert_eq!(fold_string_groups(single_element), single_element);
}

#[test]
fn test_fold_single_literal_group_is_unchanged() {
    let code = r#"msg = ("already folded")"#;
    assert_eq!(fold_string_groups(code), code);
}

#[test]
fn test_trivialize_replaces_other_function_bodies() {
    let code = r#"class Blur:
    def apply(self, image):
        import numpy as np
        kernel = np.ones((3, 3)) / 9.0
        return convolve(image, kernel)
"#;

    let stubbed = trivialize_function_bodies(code);
    assert!(stubbed.contains("    def function():"));
    assert!(stubbed.contains("        return None"));
    assert!(!stubbed.contains("numpy"));
    assert!(!stubbed.contains("convolve"));
}

#[test]
fn test_trivialize_keeps_schema_method_body() {
    let code = r#"class Blur:
    @classmethod
    def INPUT_TYPES(s):
        return {"required": {"image": ("IMAGE",)}}

    def apply(self, image):
        return (image,)
"#;

    let stubbed = trivialize_function_bodies(code);
    assert!(stubbed.contains(r#"return {"required": {"image": ("IMAGE",)}}"#));
    assert!(!stubbed.contains("return (image,)"));
}

#[test]
fn test_trivialize_consumes_multiline_signatures() {
    let code = r#"class Composite:
    def composite(
        self,
        destination,
        source,
    ):
        destination[:] = source
        return destination

    CATEGORY = "image"
"#;

    let stubbed = trivialize_function_bodies(code);
    assert!(stubbed.contains("    def function():"));
    assert!(!stubbed.contains("destination[:] = source"));
    // 函数后面的类属性必须原样保留
    assert!(stubbed.contains(r#"    CATEGORY = "image""#));
}

#[test]
fn test_trivialize_skips_blank_and_comment_lines_in_bodies() {
    let code = r#"class Noise:
    def generate(self, seed):
        rng = random.Random(seed)

# a stray top-level comment inside the body
        return rng.random()

    RETURN_TYPES = ("NOISE",)
"#;

    let stubbed = trivialize_function_bodies(code);
    assert!(!stubbed.contains("rng.random()"));
    assert!(stubbed.contains(r#"    RETURN_TYPES = ("NOISE",)"#));
}

#[test]
fn test_trivialize_preserves_declaration_indentation() {
    let code = "class A:\n    def run(self):\n        pass\n";
    let stubbed = trivialize_function_bodies(code);
    let lines: Vec<&str> = stubbed.split('\n').collect();
    assert_eq!(lines[1], "    def function():");
    assert_eq!(lines[2], "        return None");
}
