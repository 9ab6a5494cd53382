//! End-to-end tests of parsing, reading and mutating geo URIs.

use geo_url::{
    AnyCrs, CoordinatesError, GeoParams, GeoUrl, ParamsError, ParseError, ParseErrorKind,
    UpdateError, Wgs84GeoUrl, format_number,
};

#[test]
fn zoom_read_and_update() {
    let mut uri: GeoUrl = GeoUrl::parse("geo:47.6,-122.3?z=11").unwrap();
    assert_eq!(uri.z(), Some(11.0));

    uri.set_z(Some(13.0)).unwrap();
    assert_eq!(uri.to_string(), "geo:47.6,-122.3?z=13");
}

#[test]
fn ampersand_is_not_a_param_separator() {
    let uri: GeoUrl = GeoUrl::parse("geo:0,0;foo=bar&baz").unwrap();
    let params = uri.geo_params();
    assert_eq!(params.get("foo").as_deref(), Some("bar&baz"));
    assert_eq!(params.get("baz"), None);
}

#[test]
fn can_parse_depends_on_crs_policy() {
    assert!(!Wgs84GeoUrl::can_parse("geo:0,0;crs=unknown"));
    assert!(GeoUrl::<AnyCrs>::can_parse("geo:0,0;crs=unknown"));
}

#[test]
fn removing_altitude_keeps_coordinate_text() {
    let mut uri = Wgs84GeoUrl::parse("geo:48.2010,16.3695,183").unwrap();
    assert_eq!(uri.alt(), Some(183.0));

    uri.set_alt(None).unwrap();
    assert_eq!(uri.to_string(), "geo:48.2010,16.3695");
}

#[test]
fn fragment_resolves_against_base() {
    let uri: GeoUrl = GeoUrl::parse_with_base("#hash", "geo:12,34").unwrap();
    assert_eq!(uri.to_string(), "geo:12,34#hash");
}

#[test]
fn default_crs_is_implicit() {
    let mut uri: GeoUrl = GeoUrl::parse("geo:0,0").unwrap();
    assert_eq!(uri.crs(), "wgs84");

    uri.set_crs("WGS84").unwrap();
    assert_eq!(uri.to_string(), "geo:0,0");
}

#[test]
fn flag_reads_as_empty_string() {
    assert_eq!(GeoParams::parse("flag").get("flag").as_deref(), Some(""));
}

#[test]
fn crs_precedes_u_regardless_of_insertion_order() {
    let mut params = GeoParams::new();
    params.set("u", "5").unwrap();
    params.set("crs", "x").unwrap();
    assert_eq!(params.to_string(), "crs=x;u=5");

    params.set("foo", "bar").unwrap();
    assert_eq!(params.to_string(), "crs=x;u=5;foo=bar");
}

#[test]
fn number_formatting() {
    assert_eq!(format_number(0.1 + 0.2, 12).unwrap(), "0.3");
    assert_eq!(format_number(1000.0, 9).unwrap(), "1000");
}

#[test]
fn canonical_strings_round_trip() {
    for input in [
        "geo:13.4125,103.8667",
        "geo:48.2010,16.3695,183",
        "geo:48.198634,16.371648;crs=wgs84;u=40",
        "geo:90,-22.43;crs=WGS84",
        "geo:-48.198634,-16.371648,-4.5;u=0.5;flag;name=value",
        "geo:1,2;u=3?z=4#top",
    ] {
        let uri = Wgs84GeoUrl::parse(input).unwrap();
        assert_eq!(uri.to_string(), input);
    }
}

#[test]
fn rfc5870_examples() {
    let uri = Wgs84GeoUrl::parse("geo:13.4125,103.8667").unwrap();
    assert_eq!(uri.lat_lon(), [13.4125, 103.8667]);

    let uri = Wgs84GeoUrl::parse("geo:48.2010,16.3695,183").unwrap();
    assert_eq!(uri.lng_lat(), [16.3695, 48.201]);
    assert_eq!(uri.altitude(), Some(183.0));

    let uri = Wgs84GeoUrl::parse("geo:48.198634,16.371648;crs=wgs84;u=40").unwrap();
    assert_eq!(uri.crs(), "wgs84");
    assert_eq!(uri.uncertainty(), Some(40.0));
}

#[test]
fn bound_params_see_coordinate_updates() {
    let mut uri: GeoUrl = GeoUrl::parse("geo:1,2;a=1?z=3#f").unwrap();
    uri.set_coordinates(&[5.0, 6.0, 7.0]).unwrap();
    uri.geo_params_mut().set("b", "2").unwrap();
    uri.set_u(Some(10.0)).unwrap();
    uri.set_crs("EPSG:4326").unwrap();
    assert_eq!(uri.as_str(), "geo:5,6,7;crs=epsg:4326;u=10;a=1;b=2?z=3#f");

    uri.geo_params_mut().delete("A", None).unwrap();
    uri.set_coord_c(None).unwrap();
    assert_eq!(uri.as_str(), "geo:5,6;crs=epsg:4326;u=10;b=2?z=3#f");
}

#[test]
fn param_values_are_encoded_in_the_uri() {
    let mut uri: GeoUrl = GeoUrl::parse("geo:1,2").unwrap();
    uri.geo_params_mut().set("name", "a b;c=d").unwrap();
    assert_eq!(uri.as_str(), "geo:1,2;name=a%20b%3Bc%3Dd");
    assert_eq!(uri.geo_params().get("name").as_deref(), Some("a b;c=d"));
}

#[test]
fn wgs84_invariants_survive_every_write_path() {
    let mut uri = Wgs84GeoUrl::parse("geo:10,20;u=5").unwrap();

    assert!(matches!(
        uri.set_coordinates_str("100,20"),
        Err(UpdateError::InvalidCoordinates(CoordinatesError::OutOfRange { .. }))
    ));
    assert!(uri.set_coordinates(&[10.0, 181.0]).is_err());
    assert!(uri.set_coord_a(-91.0).is_err());
    assert!(uri.set_lon(-180.5).is_err());
    assert!(uri.set_lng_lat([0.0, 95.0]).is_err());
    assert!(matches!(
        uri.geo_params_mut().set("crs", "nad27"),
        Err(ParamsError::Rejected { .. })
    ));
    assert!(uri.set_crs("nad27").is_err());

    // Delimiters can't smuggle parameters or query text into the path.
    for coordinates in ["1,2;crs=nad27", "10,20?z=1", "10,20#top", "10;crs=nad27,20"] {
        assert!(
            matches!(
                uri.set_coordinates_str(coordinates),
                Err(UpdateError::InvalidCoordinates(CoordinatesError::InvalidValue { .. }))
            ),
            "{coordinates}"
        );
    }
    for name in ["x;crs", "crs=nad27;x", "x?y", "x#y", "%63rs", ""] {
        assert!(
            matches!(
                uri.geo_params_mut().set(name, "nad27"),
                Err(ParamsError::InvalidName { .. })
            ),
            "{name:?}"
        );
    }

    assert_eq!(uri.as_str(), "geo:10,20;u=5");
    assert_eq!(uri.lat_lon(), [10.0, 20.0]);
    assert_eq!(uri.crs(), "wgs84");
}

#[test]
fn coordinate_text_is_stored_as_given() {
    let mut uri: GeoUrl = GeoUrl::parse("geo:1,2;u=5?z=3").unwrap();
    assert!(uri.set_coordinates_str("7,8?q").is_err());
    assert_eq!(uri.as_str(), "geo:1,2;u=5?z=3");

    uri.set_coordinates_str("7,8.50").unwrap();
    assert_eq!(uri.coordinates_str(), "7,8.50");
    assert_eq!(uri.u(), Some(5.0));
    assert_eq!(uri.z(), Some(3.0));
}

#[test]
fn invalid_inputs_report_their_kind() {
    let cases: [(&str, fn(&ParseErrorKind) -> bool); 5] = [
        ("http://example.com", |k| {
            matches!(k, ParseErrorKind::InvalidScheme { found } if found == "http")
        }),
        ("geo:1", |k| {
            matches!(
                k,
                ParseErrorKind::InvalidCoordinates(CoordinatesError::InvalidCount { actual: 1 })
            )
        }),
        ("geo:1,2,3,4", |k| {
            matches!(
                k,
                ParseErrorKind::InvalidCoordinates(CoordinatesError::InvalidCount { actual: 4 })
            )
        }),
        ("geo:1,x", |k| {
            matches!(
                k,
                ParseErrorKind::InvalidCoordinates(CoordinatesError::InvalidValue { index: 1, .. })
            )
        }),
        ("geo:0,0;crs=nad27", |k| {
            matches!(k, ParseErrorKind::CrsMismatch { found, .. } if found == "nad27")
        }),
    ];

    for (input, check) in cases {
        let err: ParseError = Wgs84GeoUrl::parse(input).unwrap_err();
        assert_eq!(err.input, input);
        assert!(check(&err.kind), "{input}: {err}");
    }
}

#[test]
fn lenient_numeric_prefix_is_kept() {
    // Coordinates only need a numeric prefix.
    let uri: GeoUrl = GeoUrl::parse("geo:12abc,34").unwrap();
    assert_eq!(uri.coord_a(), 12.0);
    assert_eq!(uri.coordinates_str(), "12abc,34");
}

#[test]
fn policy_conversions() {
    let wgs84 = Wgs84GeoUrl::parse("geo:1,2").unwrap();
    let any: GeoUrl = wgs84.clone().into();
    assert_eq!(Wgs84GeoUrl::from_geo_url(&any).unwrap(), wgs84);

    let mut any = any;
    any.set_crs("nad27").unwrap();
    assert!(matches!(
        Wgs84GeoUrl::from_geo_url(&any),
        Err(ParseError {
            kind: ParseErrorKind::CrsMismatch { .. },
            ..
        })
    ));
}

#[test]
fn search_params_round_trip() {
    let mut uri: GeoUrl = GeoUrl::parse("geo:1,2?z=3&q=a+b").unwrap();
    let mut params = uri.search_params();
    assert_eq!(params.get("q"), Some("a b"));
    params.delete("q");
    params.append("layer", "satellite");
    uri.set_search_params(&params);
    assert_eq!(uri.as_str(), "geo:1,2?z=3&layer=satellite");

    params.delete("z");
    params.delete("layer");
    uri.set_search_params(&params);
    assert_eq!(uri.as_str(), "geo:1,2");
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_string() {
        let uri = Wgs84GeoUrl::parse("geo:1,2;u=3").unwrap();
        assert_eq!(serde_json::to_string(&uri).unwrap(), "\"geo:1,2;u=3\"");

        let params = uri.geo_params();
        assert_eq!(serde_json::to_string(&params).unwrap(), "\"u=3\"");
    }

    #[test]
    fn deserializes_with_validation() {
        let uri: Wgs84GeoUrl = serde_json::from_str("\"geo:1,2\"").unwrap();
        assert_eq!(uri.lat_lon(), [1.0, 2.0]);

        assert!(serde_json::from_str::<Wgs84GeoUrl>("\"geo:100,2\"").is_err());
        assert!(serde_json::from_str::<GeoUrl>("\"geo:100,2\"").is_ok());

        let params: GeoParams = serde_json::from_str("\"a=1;flag\"").unwrap();
        assert_eq!(params.get("flag").as_deref(), Some(""));
    }
}
