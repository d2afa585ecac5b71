fn main() {
    // option_env!() values are cached by cargo unless the build script asks
    // for a rerun when they change.
    println!("cargo:rerun-if-env-changed=DEVELOPER_RELAY_API_URL");
}
