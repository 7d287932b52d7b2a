use crate::options::Runtime;

/// How a wizard runtime choice maps onto a SAM function resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeMapping {
    /// SAM `Runtime` value.
    pub runtime: &'static str,
    /// Code directory inside the function folder.
    pub code_uri: &'static str,
    pub handler: &'static str,
    /// Extra function properties appended verbatim to the template.
    pub template_props: &'static str,
}

const NODEJS_14: RuntimeMapping = RuntimeMapping {
    runtime: "nodejs14.x",
    code_uri: "hello-world/",
    handler: "app.lambdaHandler",
    template_props: "\n      Architectures:\n        - x86_64",
};

// Maven and Gradle projects share the same function resource shape.
const JAVA_11: RuntimeMapping = RuntimeMapping {
    runtime: "java11",
    code_uri: "HelloWorldFunction",
    handler: "helloworld.App::handleRequest",
    template_props: "\n      Architectures:\n        - x86_64\n      MemorySize: 512\n      Environment:\n        Variables:\n          JAVA_TOOL_OPTIONS: -XX:+TieredCompilation -XX:TieredStopAtLevel=1",
};

pub fn runtime_mapping(runtime: Runtime) -> &'static RuntimeMapping {
    match runtime {
        Runtime::Nodejs14 => &NODEJS_14,
        Runtime::Java11Maven | Runtime::Java11Gradle => &JAVA_11,
    }
}
