fn main() {
    println!("cargo:rerun-if-env-changed=CROSSWALK_CONFIG_JSON");

    // ESP-IDF link arguments are only needed for the firmware build; host
    // test builds leave the `espidf` feature off.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
