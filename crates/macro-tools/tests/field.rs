use geode_macro_tools::Fields;

#[test]
fn test_common_read_field() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        label: String,
        layer: u32,
    }

    let meta = Meta {
        label: String::from("player"),
        layer: 3,
    };

    let label: &String = meta.label();
    let layer: u32 = meta.layer();
    assert_eq!(label, "player");
    assert_eq!(layer, 3);
}

#[test]
fn test_common_write_field() {
    #[derive(Fields)]
    #[w]
    struct Meta {
        label: String,
        layer: u32,
    }

    let mut meta = Meta {
        label: String::new(),
        layer: 3,
    };

    meta.label_mut().push_str("enemy");
    *meta.layer_mut() += 1;
    assert_eq!(meta.label, "enemy");
    assert_eq!(meta.layer, 4);
}

#[test]
fn test_copy_read_field() {
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Offset(i32, i32);

    #[derive(Fields)]
    struct Meta {
        #[r(copy)]
        offset: Offset,
    }

    let meta = Meta {
        offset: Offset(1, 2),
    };

    let offset: Offset = meta.offset();
    assert_eq!(offset, Offset(1, 2));
}

#[test]
fn test_custom_write_field_reducer() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        #[w(reducer)]
        label: String,
        layer: u32,
    }

    let mut meta = Meta {
        label: String::from("layer-"),
        layer: 3,
    };

    let layer = meta.layer();
    meta.set_label(|label| label + &layer.to_string());
    assert_eq!(meta.label(), "layer-3");
}

#[test]
fn test_custom_write_field_set() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        #[w(set)]
        enabled: bool,
        #[w(set)]
        label: String,
    }

    let mut meta = Meta {
        enabled: false,
        label: String::new(),
    };

    meta.set_enabled(true).set_label("visible");
    assert!(meta.enabled());
    assert_eq!(meta.label(), "visible");
}

#[test]
fn test_skip_field() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        layer: u32,
        #[r(skip)]
        #[allow(dead_code)]
        cache: Vec<u32>,
    }

    impl Meta {
        // would clash with a generated getter if skip was ignored
        fn cache(&self) -> usize {
            self.cache.len()
        }
    }

    let meta = Meta {
        layer: 1,
        cache: vec![1, 2],
    };

    assert_eq!(meta.layer(), 1);
    assert_eq!(meta.cache(), 2);
}

mod private {
    use geode_macro_tools::Fields;

    #[derive(Fields, Default)]
    #[r(vis(pub(crate)))]
    pub struct Meta {
        #[w(set)]
        label: String,
        layer: u32,
    }
}

#[test]
fn test_custom_read_field_vis() {
    let mut meta = private::Meta::default();
    meta.set_label("hidden");
    assert_eq!(meta.label(), "hidden");
    assert_eq!(meta.layer(), 0);
}
