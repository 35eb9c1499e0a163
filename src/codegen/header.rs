/// Boilerplate comment block at the top of every generated file.
///
/// Kept byte-for-byte stable so regenerated files diff cleanly against files
/// produced by earlier versions of the tool.
pub fn banner(file_name: &str) -> String {
    format!(
        "//\n\
         //  {file_name}\n\
         //\n\
         //  This file is auto generated by fit.\n\
         //  Github: https://github.com/k\n\
         //\n\
         //  Copyright © 2018-present Archer. All rights reserved.\n\
         //\n\
         \n"
    )
}
