fn main() {
    println!("cargo:rerun-if-env-changed=GREENHOUSE_CONFIG");

    // ESP-IDF environment is only needed when building the firmware image.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
